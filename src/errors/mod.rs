//! 에러 타입 모듈
//!
//! - [`errors::AuthError`] - 자격 증명 코어 에러
//! - [`errors::AppError`] - HTTP 응답으로 변환되는 애플리케이션 에러

pub mod errors;

pub use errors::{AppError, AppResult, AuthError};
