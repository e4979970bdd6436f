//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 공유됩니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::auth::TokenVerifier;
use crate::repository::DrinkRepository;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 음료 저장소
    pub drinks: Arc<dyn DrinkRepository>,

    /// Bearer 토큰 검증기 - 라우트별 권한 가드가 공유
    pub verifier: Arc<TokenVerifier>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    pub fn new(drinks: Arc<dyn DrinkRepository>, verifier: Arc<TokenVerifier>) -> Self {
        Self {
            drinks,
            verifier,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }

    /// 저장소 연결 상태 확인.
    pub async fn is_storage_healthy(&self) -> bool {
        self.drinks.health_check().await.is_ok()
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 빈 인메모리 저장소와 테스트 키 세트로 구성합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use crate::auth::test_support::test_verifier;
    use crate::repository::InMemoryDrinkRepository;

    AppState::new(
        Arc::new(InMemoryDrinkRepository::new()),
        Arc::new(test_verifier()),
    )
}
