//! BrightPattern 세션 인증 요청 DTO

use serde::Serialize;

/// 세션 인증 POST 본문
///
/// ```json
/// {"tenant_url": "...", "username": "...", "password": "..."}
/// ```
#[derive(Debug, Serialize)]
pub struct SessionAuthRequest<'a> {
    pub tenant_url: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

/// OAuth client-credentials 폼 본문
#[derive(Debug, Serialize)]
pub struct ClientCredentialsForm<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub scope: &'a str,
}

impl<'a> ClientCredentialsForm<'a> {
    pub fn new(client_id: &'a str, client_secret: &'a str, scope: &'a str) -> Self {
        Self {
            grant_type: "client_credentials",
            client_id,
            client_secret,
            scope,
        }
    }
}
