//! 도메인 모델
//!
//! - [`credential`] - OAuth 토큰, 세션과 만료/생존 판단 규칙
//! - [`auth_status`] - 진단용 인증 상태 스냅샷

pub mod credential;
pub mod auth_status;

pub use credential::*;
pub use auth_status::*;
