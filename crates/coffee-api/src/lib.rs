//! 커피숍 메뉴 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 음료 메뉴 REST API
//! - 외부 발급자(Auth0) RS256 토큰 검증과 권한 가드
//! - PostgreSQL 음료 저장소
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 토큰 검증 및 권한 관리
//! - [`repository`]: 음료 저장소
//! - [`error`]: API 에러 응답
//! - [`extract`]: 검증 포함 JSON 추출기

pub mod auth;
pub mod error;
pub mod extract;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{AuthError, Claims, Permission, TokenVerifier};
pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use extract::ValidatedJson;
pub use repository::{DrinkRepository, PgDrinkRepository, RepositoryError};
pub use routes::*;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
