//! BrightPattern 세션 상태
//!
//! 현재 세션 토큰과 절대 만료 시각을 보관합니다. 생존 판단은 I/O 없는 순수
//! 검사이며 5초 안전 여유를 적용합니다.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::credential_cell::CredentialCell;
use crate::domain::models::credential::{SESSION_SAFETY_MARGIN_SECS, Session, expiry_from_seconds};

pub struct SessionState {
    cell: CredentialCell<Session>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            cell: CredentialCell::new(Duration::seconds(SESSION_SAFETY_MARGIN_SECS)),
        }
    }

    /// 세션 토큰이 있고 `now < expires_at - 5s` 인지 확인합니다.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.cell.live_at(now).is_some()
    }

    /// 만료 여부와 무관하게 마지막으로 설치된 세션 토큰
    pub fn current_token(&self) -> Option<String> {
        self.cell.snapshot().map(|session| session.token.clone())
    }

    pub fn snapshot(&self) -> Option<Arc<Session>> {
        self.cell.snapshot()
    }

    /// `expires_at = now + expiry_seconds` 로 세션을 교체합니다.
    /// 0 이하의 수명은 기본 600초로 대체됩니다.
    pub fn install(&self, token: impl Into<String>, expiry_seconds: i64) -> Arc<Session> {
        let expires_at = expiry_from_seconds(Utc::now(), expiry_seconds);
        self.cell.install(Session::new(token, expires_at))
    }

    pub fn install_session(&self, session: Session) -> Arc<Session> {
        self.cell.install(session)
    }
}
