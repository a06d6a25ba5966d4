//! BrightPattern 세션 서비스
//!
//! BrightPattern CRM의 두 겹 자격 증명(OAuth2 client-credentials 토큰과
//! 테넌트 세션 토큰)을 발급, 캐싱, 갱신하고 그 위에서 통계 구독 API를
//! 호출하는 서비스입니다.
//!
//! # Features
//!
//! - **OAuth 토큰 캐시**: 잠금 없는 빠른 경로와 10초 안전 여유
//! - **세션 인증**: 응답 스키마가 바뀌어도 세션 식별자를 찾아내는 별칭 탐색
//! - **단일 비행 재인증**: 동시 요청이 몰려도 원격 인증은 한 번
//! - **복원력 있는 호출**: 시도별 타임아웃과 분류된 오류에 대한 지수 백오프 재시도
//! - **구독 API**: 생성, 조회, 삭제, 데이터 조회
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 구독 클라이언트, 재인증 조정, 세션/OAuth 인증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RequestExecutor │ ← 타임아웃 + 분류된 재시도
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  BrightPattern  │ ← OAuth / 세션 / statsapi
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use bp_session_service::services::subscriptions::SubscriptionService;
//!
//! let subscriptions = SubscriptionService::instance()?;
//! let data = subscriptions.get_data().await?;
//! ```

pub mod core;
pub mod config;
pub mod caching;
pub mod domain;
pub mod http;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
