//! 요청/응답 DTO 모듈
//!
//! - [`auth`] - 세션 인증, OAuth 토큰 요청 본문
//! - [`subscriptions`] - 구독 생성 요청과 가변 스키마 응답

pub mod auth;
pub mod subscriptions;

pub use auth::*;
pub use subscriptions::*;
