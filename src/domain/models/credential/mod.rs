//! 만료 시각을 가진 자격 증명 모델
//!
//! OAuth 액세스 토큰과 BrightPattern 세션 토큰은 서로 독립적으로 만료되며,
//! 각각 안전 여유(safety margin)를 두고 생존 여부를 판단합니다.
//!
//! ```text
//! issued ──────────────────────── expires_at - margin ──── expires_at
//!   │            live                     │     not live       │
//! ```
//!
//! 여유 시간 안으로 들어온 토큰은 원격 측에서 요청 도중 만료될 수 있으므로
//! 사용하지 않고 갱신합니다.

use chrono::{DateTime, Duration, Utc};

use crate::utils::string_utils::mask_secret;

/// OAuth 토큰 안전 여유 (초)
pub const OAUTH_SAFETY_MARGIN_SECS: i64 = 10;

/// 세션 토큰 안전 여유 (초)
pub const SESSION_SAFETY_MARGIN_SECS: i64 = 5;

/// 만료 정보가 없거나 0 이하일 때 사용하는 기본 수명 (10분)
pub const DEFAULT_LIFETIME_SECS: i64 = 600;

/// 만료 시각을 가진 값
pub trait Expiring {
    fn expires_at(&self) -> DateTime<Utc>;
}

/// `now < expires_at - margin` 이면 살아 있는 것으로 봅니다.
pub fn is_live_at(expires_at: DateTime<Utc>, now: DateTime<Utc>, margin: Duration) -> bool {
    now < expires_at - margin
}

/// 수명(초)을 절대 만료 시각으로 변환합니다. 0 이하는 기본 수명으로 대체합니다.
pub fn expiry_from_seconds(now: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    let seconds = if seconds > 0 { seconds } else { DEFAULT_LIFETIME_SECS };
    Duration::try_seconds(seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// OAuth client-credentials 액세스 토큰
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl OAuthToken {
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// 앞 8자만 남기고 가린 토큰
    pub fn masked(&self) -> String {
        mask_secret(&self.access_token, 8)
    }
}

impl Expiring for OAuthToken {
    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// BrightPattern 세션
///
/// 토큰은 항상 존재합니다. 세션이 없다는 상태는 `Option<Session>`으로 표현합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }
}

impl Expiring for Session {
    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
