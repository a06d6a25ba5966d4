//! 라우트 구성
//!
//! ```text
//! GET    /health
//! POST   /api/brightpattern/auth
//! GET    /api/brightpattern/auth/status
//! GET    /api/brightpattern/auth/info
//! POST   /api/brightpattern/subscriptions
//! POST   /api/brightpattern/subscriptions/raw
//! GET    /api/brightpattern/subscriptions/data
//! GET    /api/brightpattern/subscriptions/{id}
//! DELETE /api/brightpattern/subscriptions/{id}
//! ```

use crate::handlers;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    cfg.service(
        web::scope("/api/brightpattern")
            // 세션 인증
            .service(handlers::auth::authenticate)
            .service(handlers::auth::auth_status)
            .service(handlers::auth::auth_info)
            // 구독 - data 경로는 {id}보다 먼저 등록
            .service(handlers::subscriptions::create_subscription)
            .service(handlers::subscriptions::create_raw_subscription)
            .service(handlers::subscriptions::get_subscription_data)
            .service(handlers::subscriptions::get_subscription)
            .service(handlers::subscriptions::delete_subscription),
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "bp_session_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "session": "BrightPattern",
            "oauth": "client_credentials",
            "dependency_injection": "ServiceLocator"
        }
    }))
}
