//! BrightPattern 세션 인증 서비스
//!
//! OAuth 토큰과 테넌트 계정으로 세션을 발급받고, 응답에서 세션 식별자와
//! 만료 시간을 찾아 [`SessionState`]에 설치합니다.
//!
//! # Flow
//!
//! ```text
//! OAuthTokenService::get_valid_token()
//!          │ Bearer
//!          ▼
//! POST <auth_url> {tenant_url, username, password}
//!          │ 2xx body (스키마 가변)
//!          ▼
//! json_search::find_session_id / find_expiry_seconds
//!          │
//!          ▼
//! SessionState::install(sid, expiry or 600s)
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use serde_json::Value;

use crate::caching::SessionState;
use crate::config::BrightPatternConfig;
use crate::core::registry::ServiceLocator;
use crate::domain::dto::auth::SessionAuthRequest;
use crate::domain::models::auth_status::{AuthStatus, TokenInfo};
use crate::domain::models::credential::DEFAULT_LIFETIME_SECS;
use crate::errors::{AppResult, AuthError};
use crate::http::{RequestExecutor, RetryPolicy};
use crate::utils::json_search::{find_expiry_seconds, find_session_id};

use super::oauth_token_service::OAuthTokenService;
use super::reauth_coordinator::SessionAuthenticator;

/// 후속 CRM 호출의 쿠키에 세션을 실어 보내는 키
pub const SESSION_COOKIE_KEY: &str = "X-BP-SESSION-ID";

pub struct BrightPatternAuthService {
    config: BrightPatternConfig,
    oauth: Arc<OAuthTokenService>,
    executor: Arc<RequestExecutor>,
    session: SessionState,
}

impl BrightPatternAuthService {
    pub fn new(
        config: BrightPatternConfig,
        oauth: Arc<OAuthTokenService>,
        executor: Arc<RequestExecutor>,
    ) -> Self {
        Self {
            config,
            oauth,
            executor,
            session: SessionState::new(),
        }
    }

    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get::<Self>()
    }

    /// 세션 인증을 한 번 수행하고 원본 응답 본문을 반환합니다.
    ///
    /// 성공하면 기존 세션이 살아 있더라도 새 세션으로 교체합니다.
    /// 실패하면 세션 상태는 바뀌지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::Request` - OAuth 토큰 또는 세션 요청 실패
    /// * `AuthError::SchemaExtraction` - 응답에서 세션 식별자를 찾지 못함 (재시도하지 않음)
    pub async fn authenticate(&self) -> Result<String, AuthError> {
        log::info!(
            "BrightPattern 인증 시작 - URL: {} username={}",
            self.config.auth_url,
            self.config.username
        );

        let result = self.request_session().await;
        if let Err(e) = &result {
            log::error!("BrightPattern 인증 실패: {}", e);
        }
        result
    }

    async fn request_session(&self) -> Result<String, AuthError> {
        let bearer = self.oauth.get_valid_token().await?;
        let body = SessionAuthRequest {
            tenant_url: &self.config.tenant_url,
            username: &self.config.username,
            password: &self.config.password,
        };

        let reply = self
            .executor
            .execute(&RetryPolicy::AUTHENTICATION, "BrightPattern 인증", |client| {
                client
                    .post(&self.config.auth_url)
                    .bearer_auth(&bearer)
                    .header(COOKIE, &self.config.cookie)
                    .json(&body)
            })
            .await?;

        self.install_from_response(&reply.body)?;
        log::info!("BrightPattern 인증 성공 (세션 저장)");
        Ok(reply.body)
    }

    fn install_from_response(&self, raw: &str) -> Result<(), AuthError> {
        let document: Value = serde_json::from_str(raw).map_err(|e| {
            log::warn!("세션 응답이 JSON이 아닙니다: {}", e);
            AuthError::SchemaExtraction("session token not found".to_string())
        })?;

        let Some(session_id) = find_session_id(&document) else {
            log::warn!("세션 토큰 키를 어디에서도 찾지 못했습니다.");
            return Err(AuthError::SchemaExtraction("session token not found".to_string()));
        };

        let expires_in = find_expiry_seconds(&document).unwrap_or(DEFAULT_LIFETIME_SECS);
        let session = self.session.install(session_id, expires_in);
        log::debug!("세션 파싱 완료 token={} exp={}", session.token, session.expires_at);
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// 만료 여부와 무관한 마지막 세션 토큰
    pub fn session_token(&self) -> Option<String> {
        self.session.current_token()
    }

    /// 후속 CRM 호출의 `Authorization` 헤더 값
    ///
    /// 세션 토큰이 있으면 세션 토큰, 없으면 설정된 대체 토큰을 그대로 씁니다.
    /// `Bearer` 접두사는 붙이지 않습니다.
    pub fn credential_header_value(&self) -> Option<String> {
        self.session_token().or_else(|| {
            let fallback = self.config.fallback_token.trim();
            (!fallback.is_empty()).then(|| fallback.to_string())
        })
    }

    /// 설정된 쿠키에 `X-BP-SESSION-ID=<session>`을 덧붙인 `Cookie` 헤더 값
    pub fn session_cookie_header(&self) -> String {
        let base = self.config.cookie.trim();
        let session = self
            .session_token()
            .filter(|token| !token.trim().is_empty());

        match session {
            Some(token) if !base.contains(SESSION_COOKIE_KEY) => {
                if base.is_empty() {
                    format!("{}={}", SESSION_COOKIE_KEY, token)
                } else {
                    format!("{}; {}={}", base, SESSION_COOKIE_KEY, token)
                }
            }
            _ => base.to_string(),
        }
    }

    pub fn check_auth_status(&self) -> AuthStatus {
        match self.session_token() {
            Some(token) if self.is_authenticated() => AuthStatus::authenticated(token),
            token => AuthStatus::unauthenticated(token.is_some()),
        }
    }

    /// 진단용 자격 증명 스냅샷
    pub fn token_info(&self) -> TokenInfo {
        let session = self.session.snapshot();
        TokenInfo {
            auth_url: self.config.auth_url.clone(),
            tenant_url: self.config.tenant_url.clone(),
            username: self.config.username.clone(),
            masked_oauth_token: self.oauth.access_token_masked(),
            session_present: session.is_some(),
            session_token: session.as_ref().map(|s| s.token.clone()),
            session_expiry: session.as_ref().map(|s| s.expires_at),
            authenticated: self.is_authenticated(),
        }
    }
}

#[async_trait]
impl SessionAuthenticator for BrightPatternAuthService {
    async fn authenticate(&self) -> Result<String, AuthError> {
        BrightPatternAuthService::authenticate(self).await
    }

    fn is_authenticated(&self) -> bool {
        BrightPatternAuthService::is_authenticated(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::OAuthClientConfig;
    use crate::http::RequestError;

    async fn mount_oauth(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/configapi/v2/oauth/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "oauth-token", "expires_in": 3600})),
            )
            .mount(server)
            .await;
    }

    fn service_with(server: &MockServer, cookie: &str, fallback: &str) -> BrightPatternAuthService {
        let executor = RequestExecutor::with_client(Client::new()).shared();
        let oauth = Arc::new(OAuthTokenService::new(
            OAuthClientConfig {
                base_url: server.uri(),
                client_id: "client".to_string(),
                client_secret: "secret".to_string(),
                scope: "i4way.brightpattern.com".to_string(),
            },
            executor.clone(),
        ));

        BrightPatternAuthService::new(
            BrightPatternConfig {
                auth_url: format!("{}/configapi/v2/session", server.uri()),
                tenant_url: "tenant.example.com".to_string(),
                username: "agent".to_string(),
                password: "pw".to_string(),
                cookie: cookie.to_string(),
                fallback_token: fallback.to_string(),
            },
            oauth,
            executor,
        )
    }

    fn service(server: &MockServer) -> BrightPatternAuthService {
        service_with(server, "", "")
    }

    #[tokio::test]
    async fn test_authenticate_installs_nested_session() {
        let server = MockServer::start().await;
        mount_oauth(&server).await;
        Mock::given(method("POST"))
            .and(path("/configapi/v2/session"))
            .and(header("authorization", "Bearer oauth-token"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "tenant_url": "tenant.example.com",
                "username": "agent",
                "password": "pw"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"sessionId": "sid-1", "expiresIn": 3600}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let service = service(&server);
        let raw = service.authenticate().await.unwrap();

        assert!(raw.contains("sid-1"));
        assert!(service.is_authenticated());
        assert_eq!(service.session_token().as_deref(), Some("sid-1"));
        let expiry = service.token_info().session_expiry.unwrap();
        assert!(expiry > Utc::now() + Duration::seconds(3500));
    }

    #[tokio::test]
    async fn test_missing_expiry_uses_default_lifetime() {
        let server = MockServer::start().await;
        mount_oauth(&server).await;
        Mock::given(method("POST"))
            .and(path("/configapi/v2/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [{"token": "xyz"}]})))
            .mount(&server)
            .await;

        let service = service(&server);
        let before = Utc::now();
        service.authenticate().await.unwrap();

        let expiry = service.token_info().session_expiry.unwrap();
        assert!(expiry >= before + Duration::seconds(DEFAULT_LIFETIME_SECS));
        assert!(expiry <= Utc::now() + Duration::seconds(DEFAULT_LIFETIME_SECS));
    }

    #[tokio::test]
    async fn test_missing_session_id_is_not_retried() {
        let server = MockServer::start().await;
        mount_oauth(&server).await;
        Mock::given(method("POST"))
            .and(path("/configapi/v2/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let service = service(&server);
        let err = service.authenticate().await.unwrap_err();

        assert!(matches!(err, AuthError::SchemaExtraction(ref msg) if msg == "session token not found"));
        assert!(!service.is_authenticated());
        assert!(service.session_token().is_none());
    }

    #[tokio::test]
    async fn test_failed_authenticate_keeps_live_session() {
        let server = MockServer::start().await;
        mount_oauth(&server).await;
        Mock::given(method("POST"))
            .and(path("/configapi/v2/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session_id": "good"})))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/configapi/v2/session"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let service = service(&server);
        service.authenticate().await.unwrap();

        let err = service.authenticate().await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Request(RequestError::RemoteRejection { status: 403, .. })
        ));
        assert!(service.is_authenticated());
        assert_eq!(service.session_token().as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn test_status_and_token_info_before_authentication() {
        let server = MockServer::start().await;
        let service = service(&server);

        assert_eq!(service.check_auth_status(), AuthStatus::unauthenticated(false));

        let info = service.token_info();
        assert_eq!(info.auth_url, format!("{}/configapi/v2/session", server.uri()));
        assert!(!info.session_present);
        assert!(info.session_token.is_none());
        assert!(info.masked_oauth_token.is_none());
        assert!(!info.authenticated);
    }

    #[tokio::test]
    async fn test_status_after_authentication() {
        let server = MockServer::start().await;
        mount_oauth(&server).await;
        Mock::given(method("POST"))
            .and(path("/configapi/v2/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session_id": "sid"})))
            .mount(&server)
            .await;

        let service = service(&server);
        service.authenticate().await.unwrap();

        assert_eq!(service.check_auth_status(), AuthStatus::authenticated("sid"));
        let info = service.token_info();
        assert_eq!(info.masked_oauth_token.as_deref(), Some("oauth-to***"));
        assert!(info.session_present);
        assert!(info.authenticated);
    }

    #[tokio::test]
    async fn test_credential_header_prefers_session_over_fallback() {
        let server = MockServer::start().await;
        mount_oauth(&server).await;
        Mock::given(method("POST"))
            .and(path("/configapi/v2/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "sid"})))
            .mount(&server)
            .await;

        let service = service_with(&server, "", "static-token");
        assert_eq!(service.credential_header_value().as_deref(), Some("static-token"));

        service.authenticate().await.unwrap();
        assert_eq!(service.credential_header_value().as_deref(), Some("sid"));
    }

    #[tokio::test]
    async fn test_no_credential_without_session_or_fallback() {
        let server = MockServer::start().await;
        assert!(service(&server).credential_header_value().is_none());
    }

    #[tokio::test]
    async fn test_session_cookie_header() {
        let server = MockServer::start().await;
        mount_oauth(&server).await;
        Mock::given(method("POST"))
            .and(path("/configapi/v2/session"))
            .and(header("cookie", "lb=node1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "sid"})))
            .mount(&server)
            .await;

        let service = service_with(&server, "lb=node1", "");
        assert_eq!(service.session_cookie_header(), "lb=node1");

        service.authenticate().await.unwrap();
        assert_eq!(service.session_cookie_header(), "lb=node1; X-BP-SESSION-ID=sid");

        let pinned = service_with(&server, "X-BP-SESSION-ID=fixed", "");
        pinned.session.install("sid", 60);
        assert_eq!(pinned.session_cookie_header(), "X-BP-SESSION-ID=fixed");

        let bare = service_with(&server, "", "");
        bare.session.install("sid", 60);
        assert_eq!(bare.session_cookie_header(), "X-BP-SESSION-ID=sid");
    }
}
