//! 인증/인가 에러.
//!
//! 토큰 검증기와 권한 검사기가 반환하는 에러입니다. 각 에러는 HTTP 상태 코드와
//! 기계가 읽을 수 있는 `code`, 사람이 읽을 수 있는 `description`을 가집니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// 인증/인가 실패.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{code}] {description}")]
pub struct AuthError {
    status: StatusCode,
    code: &'static str,
    description: String,
}

impl AuthError {
    fn new(status: StatusCode, code: &'static str, description: impl Into<String>) -> Self {
        Self {
            status,
            code,
            description: description.into(),
        }
    }

    /// Authorization 헤더 없음 (401).
    pub fn missing_header() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "authorization_header_missing",
            "Authorization header is expected.",
        )
    }

    /// `Bearer <token>` 형식이 아님 (401).
    pub fn invalid_header(description: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "invalid_header", description)
    }

    /// 토큰을 해석할 수 없음 (400).
    pub fn invalid_token() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_token",
            "Unable to parse authentication token.",
        )
    }

    /// 토큰 만료 (401).
    pub fn token_expired() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "token_expired", "Token expired.")
    }

    /// 발급자/audience 불일치 또는 필수 클레임 누락 (401).
    pub fn invalid_claims() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_claims",
            "Incorrect claims. Please, check the audience and issuer.",
        )
    }

    /// 서명 검증 실패 (401).
    pub fn invalid_signature() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "invalid_signature",
            "Token signature verification failed.",
        )
    }

    /// 토큰의 `kid`와 일치하는 키 없음 (400).
    pub fn key_not_found() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "key_not_found",
            "Unable to find the appropriate key.",
        )
    }

    /// 서명 키 세트 조회 실패 (503).
    pub fn key_set_unavailable() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "key_set_unavailable",
            "Unable to fetch signing keys.",
        )
    }

    /// 클레임에 `permissions` 필드 없음 (400).
    pub fn permissions_missing() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_claims",
            "Permissions not included in JWT.",
        )
    }

    /// 요구 권한 없음 (403).
    pub fn permission_denied() -> Self {
        Self::new(StatusCode::FORBIDDEN, "unauthorized", "Permission not found.")
    }

    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// 기계가 읽을 수 있는 사유 코드.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// 사람이 읽을 수 있는 설명.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// 인증 에러 응답 본문.
///
/// 공통 에러 형식(`success`, `error`, `message`)에 검증기의
/// `code`/`description`을 함께 담습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: String,
    pub code: String,
    pub description: String,
}

impl From<&AuthError> for AuthErrorBody {
    fn from(err: &AuthError) -> Self {
        Self {
            success: false,
            error: err.status.as_u16(),
            message: err.description.clone(),
            code: err.code.to_string(),
            description: err.description.clone(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(AuthErrorBody::from(&self))).into_response()
    }
}
