//! 서버 바인딩 및 HTTP 클라이언트 설정

use std::time::Duration;

use super::{optional, parsed, process_env};

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        parsed(&process_env, "PORT", 8080)
    }

    pub fn host() -> String {
        optional(&process_env, "HOST", "127.0.0.1")
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 외부 호출용 `reqwest::Client` 설정
///
/// 응답 타임아웃은 여기서 정하지 않습니다. 호출 지점별 예산은
/// [`RetryPolicy`](crate::http::RetryPolicy)가 시도마다 적용합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(5000),
            pool_idle_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 50,
        }
    }
}

impl HttpClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            connect_timeout: Duration::from_millis(parsed(
                lookup,
                "HTTP_CONNECT_TIMEOUT_MS",
                defaults.connect_timeout.as_millis() as u64,
            )),
            pool_idle_timeout: Duration::from_secs(parsed(
                lookup,
                "HTTP_POOL_IDLE_TIMEOUT_SECS",
                defaults.pool_idle_timeout.as_secs(),
            )),
            pool_max_idle_per_host: parsed(
                lookup,
                "HTTP_POOL_MAX_IDLE_PER_HOST",
                defaults.pool_max_idle_per_host,
            ),
        }
    }
}
