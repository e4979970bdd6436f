//! Repository pattern for drink persistence.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러에서 분리합니다. 핸들러는
//! [`DrinkRepository`] 트레이트에만 의존하며, 운영에서는 PostgreSQL
//! 구현([`PgDrinkRepository`])을, 테스트에서는 인메모리 구현을 사용합니다.

pub mod drinks;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

use async_trait::async_trait;
use coffee_core::{DomainError, Drink, Ingredient};

pub use drinks::PgDrinkRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryDrinkRepository;

/// 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// 대상 레코드 없음
    #[error("레코드를 찾을 수 없습니다")]
    NotFound,
    /// 유일 제약 위반 (제목 중복)
    #[error("중복된 제목: {0}")]
    Conflict(String),
    /// 저장된 레시피를 해석할 수 없음
    #[error("손상된 레코드: {0}")]
    Corrupt(String),
    /// 저장소에 연결할 수 없음
    #[error("저장소 사용 불가: {0}")]
    Unavailable(String),
    /// 그 밖의 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict(db.message().to_string())
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => RepositoryError::Unavailable(err.to_string()),
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

impl From<DomainError> for RepositoryError {
    fn from(err: DomainError) -> Self {
        RepositoryError::Corrupt(err.to_string())
    }
}

/// 음료 저장소.
///
/// 모든 연산은 원자적이며, 실패한 쓰기는 저장소 상태를 바꾸지 않습니다.
#[async_trait]
pub trait DrinkRepository: Send + Sync {
    /// 모든 음료를 id 오름차순으로 조회.
    async fn list_all(&self) -> Result<Vec<Drink>, RepositoryError>;

    /// id로 음료 조회.
    async fn get_by_id(&self, id: i32) -> Result<Option<Drink>, RepositoryError>;

    /// 새 음료를 저장하고 id가 부여된 음료를 반환.
    async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, RepositoryError>;

    /// 기존 음료의 제목과 레시피를 덮어쓰기.
    async fn update(&self, drink: &Drink) -> Result<Drink, RepositoryError>;

    /// 음료 삭제.
    async fn delete(&self, drink: &Drink) -> Result<(), RepositoryError>;

    /// 저장소 연결 확인.
    async fn health_check(&self) -> Result<(), RepositoryError>;
}
