//! 원자적으로 교체되는 자격 증명 셀

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Duration, Utc};

use crate::domain::models::credential::{Expiring, is_live_at};

/// 만료 가능한 값 하나를 담는 셀
///
/// 읽기는 잠금 없이 현재 `Arc` 스냅샷을 가져오고, 쓰기는 값 전체를 한 번에
/// 교체합니다. 읽는 쪽은 이전 값 또는 새 값만 보며 섞인 상태를 보지 않습니다.
pub struct CredentialCell<T> {
    current: ArcSwapOption<T>,
    margin: Duration,
}

impl<T: Expiring> CredentialCell<T> {
    pub fn new(margin: Duration) -> Self {
        Self {
            current: ArcSwapOption::const_empty(),
            margin,
        }
    }

    pub fn margin(&self) -> Duration {
        self.margin
    }

    /// 만료 여부와 무관한 현재 값
    pub fn snapshot(&self) -> Option<Arc<T>> {
        self.current.load_full()
    }

    /// `now` 기준으로 안전 여유 밖에 있는 값만 반환합니다.
    pub fn live_at(&self, now: DateTime<Utc>) -> Option<Arc<T>> {
        self.snapshot()
            .filter(|value| is_live_at(value.expires_at(), now, self.margin))
    }

    pub fn live(&self) -> Option<Arc<T>> {
        self.live_at(Utc::now())
    }

    /// 값을 통째로 교체하고 설치된 스냅샷을 돌려줍니다.
    pub fn install(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.current.store(Some(Arc::clone(&value)));
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::credential::Session;

    #[test]
    fn test_empty_cell_is_not_live() {
        let cell: CredentialCell<Session> = CredentialCell::new(Duration::seconds(5));
        assert!(cell.snapshot().is_none());
        assert!(cell.live().is_none());
    }

    #[test]
    fn test_install_replaces_whole_value() {
        let cell = CredentialCell::new(Duration::seconds(5));
        let now = Utc::now();
        cell.install(Session::new("first", now + Duration::seconds(60)));
        let held = cell.snapshot().unwrap();

        cell.install(Session::new("second", now + Duration::seconds(120)));

        assert_eq!(held.token, "first");
        let current = cell.snapshot().unwrap();
        assert_eq!(current.token, "second");
        assert_eq!(current.expires_at, now + Duration::seconds(120));
    }

    #[test]
    fn test_expired_value_stays_visible_in_snapshot() {
        let cell = CredentialCell::new(Duration::seconds(10));
        let now = Utc::now();
        cell.install(Session::new("stale", now + Duration::seconds(3)));

        assert!(cell.live_at(now).is_none());
        assert_eq!(cell.snapshot().unwrap().token, "stale");
    }
}
