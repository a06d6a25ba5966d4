//! 호출 지점별 타임아웃 + 분류 기반 지수 백오프 재시도 정책
//!
//! 정책은 불변 상수로 정의되며 호출 지점의 성격(토큰 발급, 세션 인증, 변경 요청,
//! 삭제, 조회)마다 하나씩 존재합니다.
//!
//! ```text
//! attempt ──► timeout(policy.timeout) ──► Ok ─────────────────────► 반환
//!                     │
//!                     └─► Err(kind) ── 재시도 대상 && 남은 횟수 ──► sleep(backoff) ─┐
//!                                   └─ 그 외 ──► 마지막 에러 그대로 반환          │
//!    ▲                                                                          │
//!    └──────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::time::Duration;

use super::error::{ErrorKind, RequestError};

/// 백오프 지연 상한
const MAX_BACKOFF: Duration = Duration::from_secs(10);

const TRANSIENT: &[ErrorKind] = &[
    ErrorKind::TransportReset,
    ErrorKind::IoFailure,
    ErrorKind::Timeout,
];

const RESET_OR_TIMEOUT: &[ErrorKind] = &[ErrorKind::TransportReset, ErrorKind::Timeout];

/// 재시도 정책
///
/// `max_retries`는 최초 시도 이후의 **추가** 시도 횟수입니다.
/// `timeout`은 각 시도에 개별적으로 적용됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    timeout: Duration,
    retryable: &'static [ErrorKind],
}

impl RetryPolicy {
    /// OAuth client-credentials 토큰 발급
    pub const OAUTH_TOKEN: RetryPolicy =
        RetryPolicy::new(2, Duration::from_millis(300), Duration::from_secs(15), TRANSIENT);

    /// BrightPattern 세션 인증 POST
    pub const AUTHENTICATION: RetryPolicy =
        RetryPolicy::new(2, Duration::from_millis(300), Duration::from_secs(30), TRANSIENT);

    /// 구독 생성 등 변경 POST
    pub const MUTATION: RetryPolicy =
        RetryPolicy::new(2, Duration::from_millis(400), Duration::from_secs(30), TRANSIENT);

    pub const DELETION: RetryPolicy =
        RetryPolicy::new(1, Duration::from_millis(400), Duration::from_secs(15), TRANSIENT);

    /// 단건 조회 GET
    pub const LOOKUP: RetryPolicy =
        RetryPolicy::new(1, Duration::from_millis(250), Duration::from_secs(10), RESET_OR_TIMEOUT);

    /// 구독 데이터 조회 GET
    pub const DATA_READ: RetryPolicy =
        RetryPolicy::new(1, Duration::from_millis(250), Duration::from_secs(15), RESET_OR_TIMEOUT);

    /// 호출 지점 이름과 정책 (부트스트랩 출력용)
    pub const CALL_SITES: [(&'static str, RetryPolicy); 6] = [
        ("oauth_token", RetryPolicy::OAUTH_TOKEN),
        ("authentication", RetryPolicy::AUTHENTICATION),
        ("mutation", RetryPolicy::MUTATION),
        ("deletion", RetryPolicy::DELETION),
        ("lookup", RetryPolicy::LOOKUP),
        ("data_read", RetryPolicy::DATA_READ),
    ];

    pub const fn new(
        max_retries: u32,
        base_delay: Duration,
        timeout: Duration,
        retryable: &'static [ErrorKind],
    ) -> Self {
        Self {
            max_retries,
            base_delay,
            timeout,
            retryable,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retryable_kinds(&self) -> &'static [ErrorKind] {
        self.retryable
    }

    pub fn is_retryable(&self, kind: ErrorKind) -> bool {
        self.retryable.contains(&kind)
    }

    /// n번째 재시도(1부터 시작) 전에 대기할 시간: `base_delay * 2^(n-1)`
    pub fn backoff_delay(&self, retry_number: u32) -> Duration {
        let shift = retry_number.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << shift)
            .min(MAX_BACKOFF)
    }
}

/// 정책에 따라 비동기 작업을 실행합니다.
///
/// `attempt`는 시도마다 새 Future를 만들어야 합니다. 각 시도는 `policy.timeout()`
/// 안에 끝나야 하며, 초과하면 [`RequestError::Timeout`]으로 간주되어 재시도 대상이
/// 됩니다.
///
/// # Errors
///
/// 재시도 대상이 아닌 에러는 즉시, 재시도 대상 에러는 횟수 소진 후 마지막 에러를
/// 그대로 반환합니다.
pub async fn run_with_policy<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut attempt: F,
) -> Result<T, RequestError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RequestError>>,
{
    let mut retries = 0u32;

    loop {
        let outcome = match tokio::time::timeout(policy.timeout(), attempt()).await {
            Ok(result) => result,
            Err(_) => Err(RequestError::Timeout(format!(
                "{} produced no response within {:?}",
                operation,
                policy.timeout()
            ))),
        };

        let err = match outcome {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let kind = err.kind();
        if !policy.is_retryable(kind) {
            return Err(err);
        }
        if retries >= policy.max_retries() {
            log::error!(
                "{} 재시도 소진 ({}회 재시도, 마지막 실패 {}): {}",
                operation, retries, kind, err
            );
            return Err(err);
        }

        retries += 1;
        let delay = policy.backoff_delay(retries);
        log::warn!(
            "{} 실패 ({}) - {}/{} 재시도, {:?} 후: {}",
            operation,
            kind,
            retries,
            policy.max_retries(),
            delay,
            err
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32, retryable: &'static [ErrorKind]) -> RetryPolicy {
        RetryPolicy::new(
            max_retries,
            Duration::from_millis(1),
            Duration::from_millis(200),
            retryable,
        )
    }

    #[test]
    fn test_backoff_doubles_from_base_delay() {
        let policy = RetryPolicy::AUTHENTICATION;
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(300));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(600));
        assert_eq!(policy.backoff_delay(3), Duration::from_millis(1200));
        assert_eq!(policy.backoff_delay(30), MAX_BACKOFF);
    }

    #[test]
    fn test_read_policies_do_not_retry_plain_io_failures() {
        assert!(RetryPolicy::LOOKUP.is_retryable(ErrorKind::TransportReset));
        assert!(RetryPolicy::LOOKUP.is_retryable(ErrorKind::Timeout));
        assert!(!RetryPolicy::LOOKUP.is_retryable(ErrorKind::IoFailure));
        assert!(RetryPolicy::MUTATION.is_retryable(ErrorKind::IoFailure));
        assert!(!RetryPolicy::MUTATION.is_retryable(ErrorKind::RemoteRejection));
    }

    #[test]
    fn test_call_site_budgets() {
        assert_eq!(RetryPolicy::AUTHENTICATION.timeout(), Duration::from_secs(30));
        assert_eq!(RetryPolicy::LOOKUP.timeout(), Duration::from_secs(10));
        assert_eq!(RetryPolicy::DELETION.timeout(), Duration::from_secs(15));
        assert_eq!(RetryPolicy::MUTATION.max_retries(), 2);
        assert_eq!(RetryPolicy::DELETION.max_retries(), 1);
    }

    #[test]
    fn test_call_sites_cover_every_policy() {
        let (names, policies): (Vec<_>, Vec<_>) = RetryPolicy::CALL_SITES.iter().cloned().unzip();

        assert_eq!(names.len(), 6);
        assert!(policies.contains(&RetryPolicy::OAUTH_TOKEN));
        assert!(policies.contains(&RetryPolicy::DATA_READ));
        assert_eq!(RetryPolicy::CALL_SITES[2], ("mutation", RetryPolicy::MUTATION));
    }

    #[tokio::test]
    async fn test_connection_reset_is_retried_then_surfaces_reset() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), RequestError> =
            run_with_policy(&fast_policy(2, TRANSIENT), "reset-test", || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    Err(RequestError::TransportReset(format!("reset #{}", n)))
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result {
            Err(RequestError::TransportReset(msg)) => assert_eq!(msg, "reset #2"),
            other => panic!("expected last reset error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejection_is_never_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), RequestError> =
            run_with_policy(&fast_policy(3, TRANSIENT), "reject-test", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(RequestError::RemoteRejection {
                        status: 400,
                        body: "bad".into(),
                    })
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.unwrap_err().status(), Some(400));
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = run_with_policy(&fast_policy(2, TRANSIENT), "recover-test", || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(RequestError::Io("broken".into()))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_slow_attempt_times_out_and_is_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let policy = RetryPolicy::new(
            1,
            Duration::from_millis(1),
            Duration::from_millis(20),
            TRANSIENT,
        );

        let result: Result<(), RequestError> = run_with_policy(&policy, "slow-test", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_io_failure_not_retried_when_policy_excludes_it() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), RequestError> =
            run_with_policy(&fast_policy(2, RESET_OR_TIMEOUT), "io-test", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(RequestError::Io("refused".into()))
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::IoFailure);
    }
}
