//! 통합 API 에러 응답 타입.
//!
//! 모든 엔드포인트에서 일관된 에러 형식을 제공합니다.
//!
//! ```json
//! {
//!   "success": false,
//!   "error": 404,
//!   "message": "resource not found"
//! }
//! ```
//!
//! 인증 에러는 [`AuthError`]가 직접 응답을 만들며 `code`/`description`을
//! 추가로 담습니다.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::auth::AuthError;
use crate::repository::RepositoryError;

/// 에러 응답 본문.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 항상 false
    pub success: bool,
    /// HTTP 상태 코드
    pub error: u16,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: status.as_u16(),
            message: message.into(),
        }
    }
}

/// API 에러.
///
/// 내부 상세 내용은 로그로만 남기고 응답에는 상태별 고정 메시지를 씁니다.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("잘못된 요청: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("리소스를 찾을 수 없습니다")]
    NotFound,
    #[error("허용되지 않는 메서드")]
    MethodNotAllowed,
    #[error("요청 시간 초과")]
    Timeout,
    #[error("처리할 수 없는 요청: {0}")]
    Unprocessable(String),
    #[error("내부 서버 에러: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(e) => e.status(),
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad request",
            ApiError::Auth(_) => "unauthorized",
            ApiError::NotFound => "resource not found",
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::Timeout => "request timeout",
            ApiError::Unprocessable(_) => "unprocessable",
            ApiError::Internal(_) => "internal server error",
        }
    }

    /// 조회 라우트용 매핑: 모든 저장소 에러는 500.
    pub fn from_read(err: RepositoryError) -> Self {
        ApiError::Internal(err.to_string())
    }

    /// 쓰기 라우트용 매핑.
    ///
    /// `NotFound` → 404, `Unavailable` → 500, 나머지 → 422.
    pub fn from_write(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::NotFound,
            RepositoryError::Unavailable(_) => ApiError::Internal(err.to_string()),
            RepositoryError::Conflict(_)
            | RepositoryError::Corrupt(_)
            | RepositoryError::Database(_) => ApiError::Unprocessable(err.to_string()),
        }
    }
}

/// 본문을 받는 라우트는 모두 쓰기 라우트라 본문 거부는 422입니다.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

/// 본문 없는 타임아웃 응답을 JSON 에러 본문으로 바꿉니다.
///
/// `TimeoutLayer` 바깥에 `middleware::map_response`로 붙입니다.
pub async fn json_timeout_response(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        ApiError::Timeout.into_response()
    } else {
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::Auth(_) => {}
            ApiError::Internal(detail) => {
                error!(status = %status, detail = %detail, "Request failed")
            }
            ApiError::BadRequest(detail) | ApiError::Unprocessable(detail) => {
                warn!(status = %status, detail = %detail, "Request rejected")
            }
            ApiError::Timeout => warn!(status = %status, "Request timed out"),
            ApiError::NotFound | ApiError::MethodNotAllowed => {}
        }

        match self {
            ApiError::Auth(e) => e.into_response(),
            other => (
                status,
                Json(ApiErrorResponse::new(status, other.public_message())),
            )
                .into_response(),
        }
    }
}

/// API 결과 타입.
pub type ApiResult<T> = Result<T, ApiError>;
