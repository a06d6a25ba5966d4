//! 외부 HTTP 호출 계층 (Resilient Request Executor)
//!
//! 모든 원격 호출(OAuth 토큰 발급, 세션 인증, 구독 API)은 이 모듈을 거쳐
//! 호출 지점별 타임아웃과 분류 기반 재시도를 적용받습니다.
//!
//! # Modules
//!
//! - [`error`] - `ErrorKind` 분류와 `RequestError`
//! - [`retry`] - 불변 `RetryPolicy` 상수와 재시도 루프
//! - [`executor`] - `reqwest::Client`를 감싼 `RequestExecutor`
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::http::{RequestExecutor, RetryPolicy};
//!
//! let reply = executor
//!     .execute(&RetryPolicy::AUTHENTICATION, "세션 인증", |client| {
//!         client.post(&auth_url).json(&body)
//!     })
//!     .await?;
//! ```

pub mod error;
pub mod retry;
pub mod executor;

pub use error::{ErrorKind, RequestError};
pub use executor::{HttpReply, RequestExecutor};
pub use retry::{RetryPolicy, run_with_policy};
