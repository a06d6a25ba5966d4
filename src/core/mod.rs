//! # Core Framework Module
//!
//! 서비스 전역에서 공유하는 싱글톤 보관소를 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 싱글톤 보관소
//! - **ServiceLocator**: 타입별 `Arc<T>` 인스턴스 등록/조회
//! - **명시적 주입**: 생성자에서 `Arc<T>` 의존성을 직접 전달
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::core::registry::ServiceLocator;
//!
//! let executor = Arc::new(RequestExecutor::new(&HttpClientConfig::from_env())?);
//! let oauth = Arc::new(OAuthTokenService::new(OAuthClientConfig::from_env()?, executor.clone()));
//! ServiceLocator::set(oauth);
//!
//! // 핸들러
//! let oauth = OAuthTokenService::instance()?;
//! ```

pub mod registry;

pub use registry::*;
