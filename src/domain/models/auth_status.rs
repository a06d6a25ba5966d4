//! 진단용 인증 상태 모델

use chrono::{DateTime, Utc};
use serde::Serialize;

/// `GET /auth/status` 응답
///
/// ```json
/// {"authenticated": false, "sessionPresent": true}
/// {"authenticated": true, "sessionToken": "..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuthStatus {
    Authenticated {
        authenticated: bool,
        #[serde(rename = "sessionToken")]
        session_token: String,
    },
    Unauthenticated {
        authenticated: bool,
        #[serde(rename = "sessionPresent")]
        session_present: bool,
    },
}

impl AuthStatus {
    pub fn authenticated(session_token: impl Into<String>) -> Self {
        AuthStatus::Authenticated {
            authenticated: true,
            session_token: session_token.into(),
        }
    }

    pub fn unauthenticated(session_present: bool) -> Self {
        AuthStatus::Unauthenticated {
            authenticated: false,
            session_present,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated { .. })
    }
}

/// `GET /auth/info` 응답 - 현재 자격 증명 스냅샷
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub auth_url: String,
    pub tenant_url: String,
    pub username: String,
    #[serde(rename = "oauthAccessTokenMasked")]
    pub masked_oauth_token: Option<String>,
    pub session_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_expiry: Option<DateTime<Utc>>,
    pub authenticated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_status_shapes() {
        assert_eq!(
            serde_json::to_value(AuthStatus::unauthenticated(true)).unwrap(),
            json!({"authenticated": false, "sessionPresent": true})
        );
        assert_eq!(
            serde_json::to_value(AuthStatus::authenticated("sid")).unwrap(),
            json!({"authenticated": true, "sessionToken": "sid"})
        );
    }

    #[test]
    fn test_token_info_omits_absent_session_fields() {
        let info = TokenInfo {
            auth_url: "https://bp/auth".into(),
            tenant_url: "tenant".into(),
            username: "user".into(),
            masked_oauth_token: None,
            session_present: false,
            session_token: None,
            session_expiry: None,
            authenticated: false,
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["authUrl"], "https://bp/auth");
        assert!(value["oauthAccessTokenMasked"].is_null());
        assert!(value.get("sessionToken").is_none());
        assert!(value.get("sessionExpiry").is_none());
    }
}
