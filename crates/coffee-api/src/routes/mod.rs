//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/` - 서버 응답 확인
//! - `/drinks`, `/drinks-detail`, `/drinks/{id}` - 메뉴 관리
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)

pub mod drinks;
pub mod health;

pub use drinks::{
    drinks_router, CreateDrinkRequest, DeleteDrinkResponse, DrinksResponse, PatchDrinkRequest,
    SuccessResponse,
};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};

use axum::Router;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 권한 가드가 상태의 검증기를 공유해야 하므로 상태를 받아 바로 적용합니다.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(drinks_router(&state.verifier))
        .nest("/health", health_router())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

/// 알 수 없는 경로.
async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// 경로는 있지만 메서드가 없음.
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
