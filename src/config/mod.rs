//! # Configuration Module
//!
//! 서비스 설정을 환경 변수에서 읽어 중앙집중식으로 관리합니다.
//! `main`에서 `PROFILE`에 맞는 `.env.<profile>` 파일을 먼저 로드한 뒤
//! 각 설정 구조체의 `from_env()`를 호출합니다.
//!
//! ## 모듈 구성
//!
//! - [`auth_config`] - BrightPattern 세션 인증, OAuth 클라이언트, 구독 API 설정
//! - [`data_config`] - 서버 바인딩, HTTP 클라이언트 풀 설정
//!
//! ## 검증 정책
//!
//! 필수 값은 **존재 여부만** 검증합니다. 누락되거나 공백인 경우
//! `AppError::InternalError`로 어떤 변수가 빠졌는지 알려줍니다.
//! 형식 검증(URL 구문 등)은 실제 호출 시점에 드러납니다.
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # BrightPattern 세션 인증 (필수)
//! export BRIGHTPATTERN_AUTH_URL="https://tenant.brightpattern.com/configapi/v2/auth"
//! export BRIGHTPATTERN_TENANT_URL="tenant.brightpattern.com"
//! export BRIGHTPATTERN_USERNAME="api-user"
//! export BRIGHTPATTERN_PASSWORD="secret"
//!
//! # OAuth client credentials (필수)
//! export OAUTH_BASE_URL="https://tenant.brightpattern.com"
//! export OAUTH_CLIENT_ID="client-id"
//! export OAUTH_CLIENT_SECRET="client-secret"
//!
//! # 선택
//! export OAUTH_SCOPE="i4way.brightpattern.com"
//! export BRIGHTPATTERN_AUTH_COOKIE=""
//! export BRIGHTPATTERN_AUTH_TOKEN=""
//! export BRIGHTPATTERN_SUBSCRIPTION_URL="https://i4way.brightpattern.com/statsapi/subscription"
//! export HTTP_CONNECT_TIMEOUT_MS="5000"
//! export HOST="127.0.0.1"
//! export PORT="8080"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use crate::errors::{AppError, AppResult};

/// 프로세스 환경 변수 조회
///
/// 각 설정의 `from_lookup`은 조회 함수를 인자로 받으므로, 테스트에서는
/// `HashMap` 기반 조회를 넘겨 프로세스 환경을 건드리지 않습니다.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

pub(crate) fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> AppResult<String> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::InternalError(format!("{} must be set", key))),
    }
}

pub(crate) fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} 파싱 실패 ({}), 기본값 사용", key, raw);
            default
        }),
        None => default,
    }
}
