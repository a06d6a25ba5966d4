//! 자격 증명 및 세션 수명 주기 서비스 모듈
//!
//! BrightPattern은 서로 독립적으로 만료되는 두 겹의 자격 증명을 요구합니다.
//!
//! - [`OAuthTokenService`] - OAuth2 client-credentials 액세스 토큰 (10초 안전 여유)
//! - [`BrightPatternAuthService`] - 테넌트 계정 + OAuth Bearer로 발급받는 세션 (5초 안전 여유)
//! - [`ReauthCoordinator`] - 만료된 세션의 재인증을 한 번만 수행하도록 조정
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{BrightPatternAuthService, ReauthCoordinator};
//!
//! let coordinator = ReauthCoordinator::instance()?;
//! coordinator.ensure_authenticated().await?;
//!
//! let auth = BrightPatternAuthService::instance()?;
//! let credential = auth.credential_header_value();
//! ```

pub mod bright_pattern_auth_service;
pub mod oauth_token_service;
pub mod reauth_coordinator;

pub use bright_pattern_auth_service::*;
pub use oauth_token_service::*;
pub use reauth_coordinator::*;
