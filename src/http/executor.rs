//! 재시도 정책을 적용해 외부 HTTP 호출을 실행하는 Request Executor

use std::sync::Arc;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::HttpClientConfig;

use super::error::RequestError;
use super::retry::{RetryPolicy, run_with_policy};

/// 성공(2xx) 응답의 상태 코드와 본문
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    /// 본문을 JSON으로 역직렬화합니다. 빈 본문은 `null`로 취급합니다.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        let body = if self.body.trim().is_empty() { "null" } else { &self.body };
        Ok(serde_json::from_str(body)?)
    }
}

/// 외부 호출 실행기
///
/// 내부 `reqwest::Client`는 커넥션 풀을 공유하므로 복제 비용이 낮습니다.
/// 모든 서비스는 같은 실행기를 `Arc`로 공유합니다.
#[derive(Clone)]
pub struct RequestExecutor {
    client: Client,
}

impl RequestExecutor {
    pub fn new(config: &HttpClientConfig) -> Result<Self, RequestError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|e| RequestError::InvalidRequest(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 요청을 실행하고 2xx 응답 본문을 반환합니다.
    ///
    /// `build`는 시도마다 다시 호출되어 새 요청을 만듭니다.
    /// 2xx가 아닌 응답은 본문과 함께 [`RequestError::RemoteRejection`]이 됩니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let reply = executor
    ///     .execute(&RetryPolicy::LOOKUP, "구독 조회", |client| client.get(&url))
    ///     .await?;
    /// ```
    pub async fn execute<F>(
        &self,
        policy: &RetryPolicy,
        operation: &str,
        build: F,
    ) -> Result<HttpReply, RequestError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        run_with_policy(policy, operation, || {
            let request = build(&self.client);
            async move {
                let response = request.send().await?;
                let status = response.status();
                let body = response.text().await?;

                if !status.is_success() {
                    log::error!("{} 응답 오류 status={} body={}", operation, status, body);
                    return Err(RequestError::RemoteRejection {
                        status: status.as_u16(),
                        body,
                    });
                }

                Ok(HttpReply {
                    status: status.as_u16(),
                    body,
                })
            }
        })
        .await
    }
}
