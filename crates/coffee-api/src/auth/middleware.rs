//! 권한 가드 미들웨어.
//!
//! 라우트마다 요구 권한을 지정해 `route_layer`로 붙입니다. 가드는 요청 본문을
//! 읽기 전에 토큰과 권한을 확인하고, 통과하면 [`Claims`]를 요청 extensions에
//! 넣어 핸들러로 넘깁니다.
//!
//! ```rust,ignore
//! let guard = PermissionGuard::new(state.verifier.clone(), Permission::PostDrinks);
//! post(create_drink).route_layer(middleware::from_fn_with_state(guard, require_permission))
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::{bearer_token, check_permission, AuthError, Claims, Permission, TokenVerifier};

/// 가드 상태: 검증기와 요구 권한.
#[derive(Clone)]
pub struct PermissionGuard {
    verifier: Arc<TokenVerifier>,
    permission: Permission,
}

impl PermissionGuard {
    pub fn new(verifier: Arc<TokenVerifier>, permission: Permission) -> Self {
        Self {
            verifier,
            permission,
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// 헤더 추출 → 토큰 검증 → 권한 검사.
    async fn authorize(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = bearer_token(headers.get(AUTHORIZATION))?;
        let claims = self.verifier.verify(token).await?;
        check_permission(&claims, self.permission.as_str())?;
        Ok(claims)
    }
}

/// 요구 권한이 없는 요청을 거부하는 미들웨어.
pub async fn require_permission(
    State(guard): State<PermissionGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = guard.authorize(request.headers()).await.inspect_err(|e| {
        warn!(
            permission = %guard.permission,
            method = %request.method(),
            path = %request.uri().path(),
            code = e.code(),
            "Request rejected"
        );
    })?;

    debug!(
        permission = %guard.permission,
        subject = claims.subject(),
        "Permission granted"
    );

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
