//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 부트스트랩 단계에서 생성되어 `ServiceLocator`에 싱글톤으로 등록되는
//! 서비스들을 제공합니다.
//!
//! # Features
//!
//! - OAuth 액세스 토큰 발급 및 캐싱
//! - BrightPattern 세션 인증과 단일 비행 재인증
//! - 통계 구독 생성, 조회, 삭제, 데이터 조회
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::BrightPatternAuthService, subscriptions::SubscriptionService};
//!
//! let auth_service = BrightPatternAuthService::instance()?;
//! let subscription_service = SubscriptionService::instance()?;
//! ```

pub mod auth;
pub mod subscriptions;
