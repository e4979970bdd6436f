//! 인증 및 권한 부여.
//!
//! 외부 발급자(Auth0)가 서명한 RS256 Bearer 토큰을 검증하고, 토큰의
//! `permissions` 클레임으로 라우트 접근을 제어합니다.
//!
//! # 구성 요소
//!
//! - [`bearer_token`]: Authorization 헤더 파싱
//! - [`TokenVerifier`]: 서명 키 세트로 토큰 검증
//! - [`KeySource`]: 서명 키 세트 제공자 (HTTP 조회, TTL 캐시, 고정)
//! - [`check_permission`]: 권한 검사
//! - [`require_permission`]: 라우트별 권한 가드 미들웨어

mod claims;
mod error;
pub mod jwks;
mod middleware;
mod permissions;
mod verifier;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use claims::{Audience, Claims};
pub use error::{AuthError, AuthErrorBody};
pub use jwks::{CachedKeySource, JwksFetcher, KeySource, StaticKeySource, MIN_REFRESH_INTERVAL};
pub use middleware::{require_permission, PermissionGuard};
pub use permissions::{check_permission, Permission};
pub use verifier::{bearer_token, TokenVerifier};
