//! BrightPattern 통계 구독 서비스

pub mod subscription_service;

pub use subscription_service::*;
