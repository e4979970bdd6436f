//! 검증 포함 JSON 추출기.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// JSON 본문을 역직렬화한 뒤 `validator` 규칙까지 검사하는 추출기.
///
/// JSON 문법 오류, Content-Type 누락, 본문 크기 초과, 스키마 불일치,
/// 필드 검증 실패는 모두 422입니다.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|e| ApiError::Unprocessable(e.to_string()))?;
        Ok(Self(value))
    }
}
