//! 공통 유틸리티 함수 모듈
//! 
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`json_search`] - 가변 스키마 JSON에서 세션 식별자와 만료 값 탐색
//! - [`string_utils`] - 필수 문자열 검증, 비밀 값 마스킹
//! - [`display_terminal`] - 부트스트랩 시 엔드포인트와 재시도 정책 출력
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::json_search::find_session_id;
//! use crate::utils::display_terminal::print_banner;
//!
//! let sid = find_session_id(&serde_json::json!({"data": {"token": "abc"}}));
//! print_banner("BrightPattern Session Service");
//! ```

pub mod display_terminal;
pub mod json_search;
pub mod string_utils;
