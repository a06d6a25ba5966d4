//! BrightPattern Subscription HTTP Handlers
//!
//! 통계 구독 생성, 조회, 삭제와 구독 데이터 조회 엔드포인트입니다.
//! 세션이 없거나 만료되었으면 서비스 계층이 자동으로 재인증합니다.
use actix_web::{HttpResponse, delete, get, post, web};
use serde_json::Value;

use crate::domain::dto::subscriptions::SubscriptionRequest;
use crate::errors::errors::AppError;
use crate::services::subscriptions::SubscriptionService;

/// 구독 생성 (통합)
///
/// 본문 형태로 처리 경로를 고릅니다.
///
/// - `{"1": {...}}` - raw 본문 그대로 전송
/// - `{"agent_grids": [...]}` - 타입 검증 후 `"1"` 아래로 감싸 전송
///
/// # Endpoint
/// `POST /api/brightpattern/subscriptions`
#[post("/subscriptions")]
pub async fn create_subscription(payload: web::Json<Value>) -> Result<HttpResponse, AppError> {
    let body = payload.into_inner();
    log::info!("API 구독 생성 요청(통합) - shape keys: {}", shape_of(&body));

    let is_raw = body.get("1").is_some();
    if !is_raw && body.get("agent_grids").is_none() {
        return Err(AppError::InvalidRequest(
            "지원하지 않는 요청 형식입니다. {'1':{...}} 또는 {'agent_grids':[...]} 형태만 허용됩니다."
                .to_string(),
        ));
    }

    let subscription_service = SubscriptionService::instance()?;
    let response = if is_raw {
        subscription_service.create_raw(body).await?
    } else {
        let request: SubscriptionRequest = serde_json::from_value(body).map_err(|e| {
            AppError::ValidationError(format!("요청 본문을 DTO로 변환할 수 없습니다: {}", e))
        })?;
        subscription_service.create(request).await?
    };

    Ok(HttpResponse::Ok().json(response))
}

/// 구독 생성 (raw 호환 엔드포인트)
///
/// # Endpoint
/// `POST /api/brightpattern/subscriptions/raw`
#[post("/subscriptions/raw")]
pub async fn create_raw_subscription(payload: web::Json<Value>) -> Result<HttpResponse, AppError> {
    log::warn!("호환 엔드포인트 호출: POST /subscriptions/raw");
    let body = payload.into_inner();
    if !body.is_object() {
        return Err(AppError::InvalidRequest("JSON 객체 본문이 필요합니다.".to_string()));
    }

    let subscription_service = SubscriptionService::instance()?;
    let response = subscription_service.create_raw(body).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// # Endpoint
/// `GET /api/brightpattern/subscriptions/data`
#[get("/subscriptions/data")]
pub async fn get_subscription_data() -> Result<HttpResponse, AppError> {
    log::info!("API 구독 데이터 조회 요청");
    let subscription_service = SubscriptionService::instance()?;
    let raw = subscription_service.get_data().await?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(raw))
}

/// # Endpoint
/// `GET /api/brightpattern/subscriptions/{id}`
#[get("/subscriptions/{id}")]
pub async fn get_subscription(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let subscription_id = path.into_inner();
    log::info!("API 구독 조회 요청 - ID: {}", subscription_id);

    let subscription_service = SubscriptionService::instance()?;
    let response = subscription_service.get(&subscription_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// # Endpoint
/// `DELETE /api/brightpattern/subscriptions/{id}`
#[delete("/subscriptions/{id}")]
pub async fn delete_subscription(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let subscription_id = path.into_inner();
    log::info!("API 구독 삭제 요청 - ID: {}", subscription_id);

    let subscription_service = SubscriptionService::instance()?;
    subscription_service.delete(&subscription_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

fn shape_of(body: &Value) -> String {
    match body {
        Value::Object(root) => root
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| "(empty)".to_string()),
        _ => "(non-object)".to_string(),
    }
}
