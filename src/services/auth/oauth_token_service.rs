//! OAuth2 client-credentials 토큰 서비스
//!
//! 머신 간 인증용 액세스 토큰을 발급받아 메모리에 보관합니다.
//! 캐시된 토큰이 10초 안전 여유 밖에 있으면 네트워크 호출 없이 바로 반환하고,
//! 그렇지 않으면 토큰 엔드포인트에서 새로 발급받습니다.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::Value;

use crate::caching::CredentialCell;
use crate::config::OAuthClientConfig;
use crate::core::registry::ServiceLocator;
use crate::domain::dto::auth::ClientCredentialsForm;
use crate::domain::models::credential::{
    DEFAULT_LIFETIME_SECS, OAUTH_SAFETY_MARGIN_SECS, OAuthToken, expiry_from_seconds,
};
use crate::errors::{AppResult, AuthError};
use crate::http::{RequestExecutor, RetryPolicy};

pub struct OAuthTokenService {
    config: OAuthClientConfig,
    executor: Arc<RequestExecutor>,
    token: CredentialCell<OAuthToken>,
}

impl OAuthTokenService {
    pub fn new(config: OAuthClientConfig, executor: Arc<RequestExecutor>) -> Self {
        Self {
            config,
            executor,
            token: CredentialCell::new(Duration::seconds(OAUTH_SAFETY_MARGIN_SECS)),
        }
    }

    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get::<Self>()
    }

    /// 유효한 액세스 토큰을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::Request` - 토큰 엔드포인트 호출 실패 (재시도 소진 포함)
    /// * `AuthError::SchemaExtraction` - 응답에 `access_token`이 없음
    pub async fn get_valid_token(&self) -> Result<String, AuthError> {
        if let Some(token) = self.token.live() {
            return Ok(token.access_token.clone());
        }

        let token = self.fetch_token().await?;
        Ok(token.access_token.clone())
    }

    /// 토큰 엔드포인트에서 새 토큰을 발급받아 설치합니다.
    ///
    /// 실패하면 기존 토큰은 그대로 남습니다.
    pub async fn fetch_token(&self) -> Result<Arc<OAuthToken>, AuthError> {
        let token_url = self.config.token_url();
        log::info!("OAuth 토큰 요청 시작 url={}", token_url);

        let form = ClientCredentialsForm::new(
            &self.config.client_id,
            &self.config.client_secret,
            &self.config.scope,
        );

        let reply = self
            .executor
            .execute(&RetryPolicy::OAUTH_TOKEN, "OAuth 토큰 요청", |client| {
                client.post(&token_url).form(&form)
            })
            .await
            .inspect_err(|e| log::error!("OAuth 토큰 요청 실패: {}", e))?;

        let document: Value = reply.json().map_err(|e| {
            log::error!("OAuth 토큰 파싱 실패: {}", e);
            AuthError::SchemaExtraction(format!("OAuth 토큰 응답 파싱 실패: {}", e))
        })?;

        let access_token = document
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                log::error!("OAuth 토큰 응답에 access_token 누락");
                AuthError::SchemaExtraction("access_token not found".to_string())
            })?;

        let expires_in = parse_expires_in(document.get("expires_in"));
        let token = self.token.install(OAuthToken::new(
            access_token,
            expiry_from_seconds(Utc::now(), expires_in),
        ));

        log::info!("OAuth 토큰 획득 성공 (만료 {}s)", expires_in);
        Ok(token)
    }

    /// 앞 8자만 남긴 토큰. 한 번도 발급받지 않았다면 `None`
    pub fn access_token_masked(&self) -> Option<String> {
        self.token.snapshot().map(|token| token.masked())
    }
}

/// 숫자 또는 숫자 문자열을 초로 해석합니다. 없거나 0 이하면 기본 수명
fn parse_expires_in(value: Option<&Value>) -> i64 {
    let seconds = match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|n| n.is_finite()).map(|n| n as i64)),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    seconds
        .filter(|seconds| *seconds > 0)
        .unwrap_or(DEFAULT_LIFETIME_SECS)
}
