//! 커피숍 도메인 모델.

pub mod drink;

pub use drink::*;
