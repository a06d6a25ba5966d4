//! 도메인 계층
//!
//! 자격 증명 모델과 외부 API DTO를 정의합니다.

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
