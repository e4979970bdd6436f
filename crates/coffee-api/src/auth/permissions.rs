//! 권한 정의 및 검사.

use super::{AuthError, Claims};

/// 메뉴 API 권한.
///
/// 토큰의 `permissions` 클레임에 문자열 형태로 담겨 옵니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// 상세(재료 이름 포함) 조회
    GetDrinksDetail,
    /// 음료 생성
    PostDrinks,
    /// 음료 수정
    PatchDrinks,
    /// 음료 삭제
    DeleteDrinks,
}

impl Permission {
    /// 모든 권한.
    pub const ALL: [Permission; 4] = [
        Permission::GetDrinksDetail,
        Permission::PostDrinks,
        Permission::PatchDrinks,
        Permission::DeleteDrinks,
    ];

    /// 토큰에 담기는 권한 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::GetDrinksDetail => "get:drinks-detail",
            Permission::PostDrinks => "post:drinks",
            Permission::PatchDrinks => "patch:drinks",
            Permission::DeleteDrinks => "delete:drinks",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 클레임에 요구 권한이 있는지 확인합니다.
///
/// - `permissions` 필드 없음 → 400 `invalid_claims`
/// - 요구 권한 없음 → 403 `unauthorized`
///
/// 권한 문자열은 정확히 일치해야 합니다 (대소문자 구분, 와일드카드 없음).
pub fn check_permission(claims: &Claims, required: &str) -> Result<(), AuthError> {
    let permissions = claims
        .permissions
        .as_ref()
        .ok_or_else(AuthError::permissions_missing)?;

    if permissions.iter().any(|p| p == required) {
        Ok(())
    } else {
        Err(AuthError::permission_denied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Audience;
    use axum::http::StatusCode;
    use proptest::prelude::*;

    fn claims_with(permissions: Option<Vec<String>>) -> Claims {
        Claims {
            iss: "https://coffee-shop.test/".to_string(),
            sub: Some("auth0|manager".to_string()),
            aud: Audience::Single("drinks".to_string()),
            exp: 4_102_444_800,
            iat: None,
            permissions,
        }
    }

    #[test]
    fn test_permission_strings() {
        assert_eq!(Permission::GetDrinksDetail.as_str(), "get:drinks-detail");
        assert_eq!(Permission::PostDrinks.to_string(), "post:drinks");
        assert_eq!(Permission::PatchDrinks.as_str(), "patch:drinks");
        assert_eq!(Permission::DeleteDrinks.to_string(), "delete:drinks");
    }

    #[test]
    fn test_check_permission_granted() {
        let claims = claims_with(Some(vec![
            "get:drinks-detail".to_string(),
            "post:drinks".to_string(),
        ]));
        assert!(check_permission(&claims, "post:drinks").is_ok());
    }

    #[test]
    fn test_check_permission_missing_field() {
        let err = check_permission(&claims_with(None), "post:drinks").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "invalid_claims");
    }

    #[test]
    fn test_check_permission_empty_list_is_forbidden() {
        let err = check_permission(&claims_with(Some(vec![])), "post:drinks").unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "unauthorized");
    }

    #[test]
    fn test_check_permission_no_prefix_match() {
        let claims = claims_with(Some(vec!["post:drinks-extra".to_string()]));
        assert!(check_permission(&claims, "post:drinks").is_err());
    }

    proptest! {
        #[test]
        fn prop_granted_iff_listed(
            granted in prop::collection::vec(prop::sample::select(Permission::ALL.to_vec()), 0..4),
            required in prop::sample::select(Permission::ALL.to_vec()),
        ) {
            let claims = claims_with(Some(granted.iter().map(|p| p.as_str().to_string()).collect()));
            let result = check_permission(&claims, required.as_str());

            if granted.contains(&required) {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result.unwrap_err().status(), StatusCode::FORBIDDEN);
            }
        }
    }
}
