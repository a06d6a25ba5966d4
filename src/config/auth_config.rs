//! BrightPattern 인증 관련 설정
//!
//! 세션 인증(tenant/username/password), OAuth client-credentials,
//! 구독 API 엔드포인트 설정을 제공합니다.

use std::fmt;

use super::{optional, process_env, required};
use crate::errors::AppResult;

pub const DEFAULT_OAUTH_SCOPE: &str = "i4way.brightpattern.com";
pub const DEFAULT_SUBSCRIPTION_URL: &str = "https://i4way.brightpattern.com/statsapi/subscription";

/// OAuth 토큰 엔드포인트 경로 (base URL 기준)
const TOKEN_PATH: &str = "configapi/v2/oauth/token";

/// BrightPattern 세션 인증 설정
///
/// `cookie`는 외부에서 받은 고정 쿠키 문자열이며 비어 있을 수 있습니다.
/// `fallback_token`은 세션이 없을 때 `Authorization` 헤더에 그대로 사용되는 값입니다.
#[derive(Clone)]
pub struct BrightPatternConfig {
    pub auth_url: String,
    pub tenant_url: String,
    pub username: String,
    pub password: String,
    pub cookie: String,
    pub fallback_token: String,
}

impl BrightPatternConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        Ok(Self {
            auth_url: required(lookup, "BRIGHTPATTERN_AUTH_URL")?,
            tenant_url: required(lookup, "BRIGHTPATTERN_TENANT_URL")?,
            username: required(lookup, "BRIGHTPATTERN_USERNAME")?,
            password: required(lookup, "BRIGHTPATTERN_PASSWORD")?,
            cookie: lookup("BRIGHTPATTERN_AUTH_COOKIE").unwrap_or_default(),
            fallback_token: lookup("BRIGHTPATTERN_AUTH_TOKEN").unwrap_or_default(),
        })
    }
}

impl fmt::Debug for BrightPatternConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrightPatternConfig")
            .field("auth_url", &self.auth_url)
            .field("tenant_url", &self.tenant_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("cookie_present", &!self.cookie.is_empty())
            .field("fallback_token_present", &!self.fallback_token.is_empty())
            .finish()
    }
}

/// OAuth2 client-credentials 클라이언트 설정
#[derive(Clone)]
pub struct OAuthClientConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
}

impl OAuthClientConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        Ok(Self {
            base_url: required(lookup, "OAUTH_BASE_URL")?,
            client_id: required(lookup, "OAUTH_CLIENT_ID")?,
            client_secret: required(lookup, "OAUTH_CLIENT_SECRET")?,
            scope: optional(lookup, "OAUTH_SCOPE", DEFAULT_OAUTH_SCOPE),
        })
    }

    /// `<base>/configapi/v2/oauth/token` (base 끝의 `/` 유무와 무관)
    pub fn token_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), TOKEN_PATH)
    }
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("scope", &self.scope)
            .finish()
    }
}

/// 구독 API 엔드포인트 설정
#[derive(Debug, Clone)]
pub struct SubscriptionConfig {
    pub base_url: String,
    data_url: Option<String>,
}

impl SubscriptionConfig {
    pub fn new(base_url: impl Into<String>, data_url: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            data_url: data_url.filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self::new(
            optional(lookup, "BRIGHTPATTERN_SUBSCRIPTION_URL", DEFAULT_SUBSCRIPTION_URL),
            lookup("BRIGHTPATTERN_SUBSCRIPTION_DATA_URL"),
        )
    }

    /// 명시적 data URL이 없으면 `<base>/data`
    pub fn data_url(&self) -> String {
        match &self.data_url {
            Some(url) => url.clone(),
            None => format!("{}/data", self.base_url.trim_end_matches('/')),
        }
    }

    pub fn subscription_url(&self, subscription_id: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(subscription_id)
        )
    }
}
