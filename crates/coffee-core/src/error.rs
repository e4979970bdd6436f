//! 도메인 에러 타입.
//!
//! 음료 모델과 레시피 코덱에서 사용되는 에러를 정의합니다.

use thiserror::Error;

/// 도메인 에러.
#[derive(Debug, Error)]
pub enum DomainError {
    /// 레시피 직렬화 실패
    #[error("레시피 직렬화 실패: {0}")]
    RecipeEncoding(String),

    /// 저장된 레시피 텍스트를 해석할 수 없음
    #[error("레시피 역직렬화 실패: {0}")]
    RecipeDecoding(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::RecipeDecoding("expected value".to_string());
        assert_eq!(err.to_string(), "레시피 역직렬화 실패: expected value");
    }
}
