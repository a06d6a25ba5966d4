//! 세션 재인증 단일 비행(single-flight) 조정자
//!
//! 여러 요청이 동시에 만료된 세션을 발견해도 원격 인증은 한 번만 수행됩니다.
//!
//! ```text
//! caller A ──▶ live? no ──▶ flag CAS 성공 ──▶ live? no ──▶ authenticate() ──▶ flag 해제 + notify ──▶ 재확인
//! caller B ──▶ live? no ──▶ flag CAS 실패 ──▶ notify 또는 300ms 대기 ──────────────────▶ 재확인
//! ```
//!
//! 승자의 인증 실패는 로그만 남기고 삼킵니다. 어느 쪽이든 마지막 재확인 결과가
//! 유효하지 않으면 `AuthError::NotAuthenticated`를 반환합니다. 대기자는 한 번만
//! 기다리며 스스로 재시도하지 않습니다.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::core::registry::ServiceLocator;
use crate::errors::{AppResult, AuthError};

/// 패배한 호출자의 최대 대기 시간
pub const REAUTH_WAIT: Duration = Duration::from_millis(300);

/// 세션을 발급하고 생존 여부를 알려주는 인증기
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    /// 원격 인증을 한 번 수행합니다.
    async fn authenticate(&self) -> Result<String, AuthError>;

    /// I/O 없이 현재 세션이 유효한지 확인합니다.
    fn is_authenticated(&self) -> bool;
}

pub struct ReauthCoordinator {
    authenticator: Arc<dyn SessionAuthenticator>,
    in_progress: AtomicBool,
    finished: Notify,
    wait: Duration,
}

/// 플래그를 해제하고 대기자를 깨웁니다. 인증 future가 취소되어도 실행됩니다.
struct InFlight<'a> {
    coordinator: &'a ReauthCoordinator,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.coordinator.in_progress.store(false, Ordering::Release);
        self.coordinator.finished.notify_waiters();
    }
}

impl ReauthCoordinator {
    pub fn new(authenticator: Arc<dyn SessionAuthenticator>) -> Self {
        Self::with_wait(authenticator, REAUTH_WAIT)
    }

    pub fn with_wait(authenticator: Arc<dyn SessionAuthenticator>, wait: Duration) -> Self {
        Self {
            authenticator,
            in_progress: AtomicBool::new(false),
            finished: Notify::new(),
            wait,
        }
    }

    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get::<Self>()
    }

    /// 유효한 세션을 보장합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::NotAuthenticated` - 재인증 후에도, 또는 대기 후에도 세션이 유효하지 않음
    pub async fn ensure_authenticated(&self) -> Result<(), AuthError> {
        if self.authenticator.is_authenticated() {
            return Ok(());
        }

        match self.try_begin() {
            Some(in_flight) => {
                // 빠른 확인과 CAS 사이에 다른 승자가 세션을 설치했을 수 있음
                if self.authenticator.is_authenticated() {
                    return Ok(());
                }

                log::info!("세션 없음/만료 - 자동 재인증 시도");
                if let Err(e) = self.authenticator.authenticate().await {
                    log::error!("자동 재인증 실패: {}", e);
                }
                drop(in_flight);

                self.recheck("자동 재인증 실패")
            }
            None => {
                let finished = self.finished.notified();
                if self.in_progress.load(Ordering::Acquire) {
                    log::debug!("다른 재인증 진행 중 - 최대 {:?} 대기", self.wait);
                    let _ = tokio::time::timeout(self.wait, finished).await;
                }

                self.recheck("자동 재인증 진행 중이었으나 실패")
            }
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    fn try_begin(&self) -> Option<InFlight<'_>> {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight { coordinator: self })
    }

    fn recheck(&self, failure: &str) -> Result<(), AuthError> {
        if self.authenticator.is_authenticated() {
            Ok(())
        } else {
            Err(AuthError::NotAuthenticated(failure.to_string()))
        }
    }
}
