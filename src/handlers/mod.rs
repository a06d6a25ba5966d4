//! HTTP 요청 핸들러 모듈
//!
//! 웹 API 엔드포인트를 처리하는 핸들러 함수들을 제공합니다.
//! 핸들러는 얇게 유지하며 모든 로직은 서비스 계층에 위임합니다.
//!
//! # Modules
//!
//! - [`auth`] - 세션 인증과 자격 증명 진단
//! - [`subscriptions`] - 통계 구독 관리

pub mod auth;
pub mod subscriptions;
