//! BrightPattern 통계 구독 클라이언트
//!
//! 모든 호출은 먼저 [`ReauthCoordinator::ensure_authenticated`]로 세션을 확보한 뒤
//! 세션 토큰(또는 대체 토큰)을 `Authorization` 헤더에, 세션 쿠키를 `Cookie`
//! 헤더에 실어 보냅니다.

use std::sync::Arc;

use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, COOKIE};
use serde_json::Value;
use validator::Validate;

use crate::config::SubscriptionConfig;
use crate::core::registry::ServiceLocator;
use crate::domain::dto::subscriptions::{SubscriptionRequest, SubscriptionResponse};
use crate::errors::{AppError, AppResult};
use crate::http::{RequestExecutor, RetryPolicy};
use crate::services::auth::{BrightPatternAuthService, ReauthCoordinator};
use crate::utils::string_utils::validate_required_string;

pub struct SubscriptionService {
    config: SubscriptionConfig,
    auth: Arc<BrightPatternAuthService>,
    coordinator: Arc<ReauthCoordinator>,
    executor: Arc<RequestExecutor>,
}

impl SubscriptionService {
    pub fn new(
        config: SubscriptionConfig,
        auth: Arc<BrightPatternAuthService>,
        coordinator: Arc<ReauthCoordinator>,
        executor: Arc<RequestExecutor>,
    ) -> Self {
        Self {
            config,
            auth,
            coordinator,
            executor,
        }
    }

    pub fn instance() -> AppResult<Arc<Self>> {
        ServiceLocator::get::<Self>()
    }

    /// `{"1": {"agent_grids": [...]}}` 형태의 본문으로 구독을 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 본문 구조가 잘못됨 (원격 호출 전에 거절)
    /// * `AppError::NotAuthenticated` - 세션 확보 실패
    /// * `AppError::ExternalServiceError` - 원격 호출 실패
    pub async fn create_raw(&self, body: Value) -> AppResult<SubscriptionResponse> {
        validate_raw_structure(&body)?;
        self.coordinator.ensure_authenticated().await?;
        log::info!("구독 생성(raw) 호출");

        let url = self.config.base_url.as_str();
        let reply = self
            .executor
            .execute(&RetryPolicy::MUTATION, "구독 생성", |client| {
                self.with_credentials(client.post(url)).json(&body)
            })
            .await?;

        let response = reply.json::<Option<SubscriptionResponse>>()?.unwrap_or_default();
        log::info!("구독 생성 성공 id={:?}", response.subscription_id);
        Ok(response)
    }

    /// 타입 검증 후 API 형태로 감싸 [`create_raw`](Self::create_raw)에 위임합니다.
    pub async fn create(&self, request: SubscriptionRequest) -> AppResult<SubscriptionResponse> {
        request.validate()?;
        log::info!("구독 생성 요청(agent_grids) size={}", request.agent_grids.len());
        self.create_raw(request.into_wire_body()).await
    }

    pub async fn get(&self, subscription_id: &str) -> AppResult<SubscriptionResponse> {
        let subscription_id = validate_required_string(subscription_id, "subscription id")?;
        self.coordinator.ensure_authenticated().await?;
        log::debug!("구독 조회 id={}", subscription_id);

        let url = self.config.subscription_url(&subscription_id);
        let reply = self
            .executor
            .execute(&RetryPolicy::LOOKUP, "구독 조회", |client| {
                self.with_credentials(client.get(&url))
            })
            .await?;

        Ok(reply.json::<Option<SubscriptionResponse>>()?.unwrap_or_default())
    }

    /// 2xx(204 포함)면 성공입니다.
    pub async fn delete(&self, subscription_id: &str) -> AppResult<()> {
        let subscription_id = validate_required_string(subscription_id, "subscription id")?;
        self.coordinator.ensure_authenticated().await?;
        log::info!("구독 삭제 요청 id={}", subscription_id);

        let url = self.config.subscription_url(&subscription_id);
        self.executor
            .execute(&RetryPolicy::DELETION, "구독 삭제", |client| {
                self.with_credentials(client.delete(&url))
            })
            .await?;

        log::info!("구독 삭제 성공 id={}", subscription_id);
        Ok(())
    }

    /// 구독 데이터 원본 본문
    pub async fn get_data(&self) -> AppResult<String> {
        self.coordinator.ensure_authenticated().await?;
        log::debug!("구독 데이터 조회");

        let url = self.config.data_url();
        let reply = self
            .executor
            .execute(&RetryPolicy::DATA_READ, "구독 데이터 조회", |client| {
                self.with_credentials(client.get(&url))
            })
            .await?;

        Ok(reply.body)
    }

    fn with_credentials(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(COOKIE, self.auth.session_cookie_header());
        match self.auth.credential_header_value() {
            Some(credential) => request.header(AUTHORIZATION, credential),
            None => request,
        }
    }
}

/// raw 구독 본문 구조 검증
///
/// 루트는 비어 있지 않은 객체, `"1"`은 객체, `"1".agent_grids`는 비어 있지 않은
/// 배열이어야 합니다. 각 grid는 공백이 아닌 `id`와 비어 있지 않은 `columns`
/// 배열을 가져야 하며, 에러 메시지의 grid 번호는 1부터 셉니다.
pub fn validate_raw_structure(body: &Value) -> AppResult<()> {
    let invalid = |msg: String| AppError::ValidationError(msg);

    let root = body
        .as_object()
        .filter(|root| !root.is_empty())
        .ok_or_else(|| invalid("구독 JSON이 비어 있습니다.".to_string()))?;

    let first = root
        .get("1")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("루트 키 '1' 객체가 필요합니다.".to_string()))?;

    let grids = first
        .get("agent_grids")
        .and_then(Value::as_array)
        .filter(|grids| !grids.is_empty())
        .ok_or_else(|| invalid("'1.agent_grids' 배열이 비어있거나 없음".to_string()))?;

    for (index, grid) in grids.iter().enumerate() {
        let idx = index + 1;
        let grid = grid
            .as_object()
            .ok_or_else(|| invalid(format!("agent_grids[{}] 요소는 객체여야 합니다.", idx)))?;

        let has_id = match grid.get("id") {
            Some(Value::String(id)) => !id.trim().is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        };
        if !has_id {
            return Err(invalid(format!("agent_grids[{}] id 누락", idx)));
        }

        let has_columns = grid
            .get("columns")
            .and_then(Value::as_array)
            .is_some_and(|columns| !columns.is_empty());
        if !has_columns {
            return Err(invalid(format!("agent_grids[{}] columns 배열 누락", idx)));
        }
    }

    Ok(())
}
