//! # Coffee Core
//!
//! 커피숍 메뉴 API의 핵심 도메인 모델 및 공용 인프라를 제공합니다.
//!
//! 이 크레이트는 API 서버 전반에서 사용되는 기본 타입을 제공합니다:
//! - 음료(Drink) 및 레시피 재료(Ingredient) 모델
//! - 공개용(short) / 상세용(long) 직렬화 뷰
//! - 레시피 직렬화 코덱
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use crate::config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
