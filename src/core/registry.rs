//! # Service Registry - 프로세스 전역 싱글톤 보관소
//!
//! 부트스트랩 단계에서 생성한 서비스 인스턴스를 타입별로 하나씩 보관하고,
//! 핸들러가 `Service::instance()` 형태로 꺼내 쓸 수 있게 합니다.
//!
//! ## 동작 방식
//!
//! ```text
//! main()
//!    ├─ RequestExecutor::new()          → ServiceLocator::set()
//!    ├─ OAuthTokenService::new(..)      → ServiceLocator::set()
//!    ├─ BrightPatternAuthService::new() → ServiceLocator::set()
//!    ├─ ReauthCoordinator::new(..)      → ServiceLocator::set()
//!    └─ SubscriptionService::new(..)    → ServiceLocator::set()
//!
//! handler
//!    └─ SubscriptionService::instance() → ServiceLocator::get::<SubscriptionService>()
//! ```
//!
//! 의존성은 생성 시점에 `Arc<T>`로 직접 주입합니다. 레지스트리는 조회만 담당하며
//! 인스턴스를 스스로 생성하지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::core::registry::ServiceLocator;
//!
//! ServiceLocator::set(Arc::new(executor));
//! let executor = ServiceLocator::get::<RequestExecutor>()?;
//! ```

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::errors::{AppError, AppResult};

/// 타입별 싱글톤 인스턴스 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// 등록된 인스턴스를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 부트스트랩에서 등록되지 않은 타입
    pub fn get<T: 'static + Send + Sync>() -> AppResult<Arc<T>> {
        Self::try_get::<T>().ok_or_else(|| {
            AppError::InternalError(format!(
                "Service not found: {}. Register it with ServiceLocator::set() during bootstrap",
                Self::clean_type_name(type_name::<T>())
            ))
        })
    }

    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 인스턴스를 등록합니다. 같은 타입이 이미 있으면 교체합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let clean_name = Self::clean_type_name(type_name::<T>());
        log::debug!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR
            .instances
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 인스턴스 수
    pub fn registered_count() -> usize {
        LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn clean_type_name(type_name: &str) -> &str {
        match type_name.rfind("::") {
            Some(pos) => &type_name[pos + 2..],
            None => type_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RegisteredMarker(u32);
    struct MissingMarker;

    #[test]
    fn test_set_then_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(RegisteredMarker(7)));
        let first = ServiceLocator::get::<RegisteredMarker>().unwrap();
        let second = ServiceLocator::get::<RegisteredMarker>().unwrap();

        assert_eq!(first.0, 7);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_type_is_internal_error() {
        assert!(ServiceLocator::try_get::<MissingMarker>().is_none());
        match ServiceLocator::get::<MissingMarker>() {
            Err(AppError::InternalError(msg)) => assert!(msg.contains("MissingMarker")),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_clean_type_name() {
        assert_eq!(ServiceLocator::clean_type_name("a::b::OAuthTokenService"), "OAuthTokenService");
        assert_eq!(ServiceLocator::clean_type_name("Plain"), "Plain");
    }
}
