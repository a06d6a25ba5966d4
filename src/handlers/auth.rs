//! BrightPattern Authentication HTTP Handlers
//!
//! 세션 인증을 수동으로 실행하고 현재 자격 증명 상태를 진단하는 엔드포인트입니다.
//!
//! # Endpoints
//!
//! - `POST /api/brightpattern/auth` - 세션 인증 (원본 응답 그대로 반환)
//! - `GET /api/brightpattern/auth/status` - 세션 유효 여부
//! - `GET /api/brightpattern/auth/info` - 자격 증명 스냅샷 (OAuth 토큰은 마스킹)
use actix_web::{HttpResponse, get, post};

use crate::errors::errors::AppError;
use crate::services::auth::BrightPatternAuthService;

/// 세션 인증 핸들러
///
/// 기존 세션이 유효하더라도 새 세션으로 교체합니다.
///
/// # Endpoint
/// `POST /api/brightpattern/auth`
#[post("/auth")]
pub async fn authenticate() -> Result<HttpResponse, AppError> {
    log::info!("API 인증 요청");
    let auth_service = BrightPatternAuthService::instance()?;
    let raw = auth_service.authenticate().await?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(raw))
}

/// # Endpoint
/// `GET /api/brightpattern/auth/status`
#[get("/auth/status")]
pub async fn auth_status() -> Result<HttpResponse, AppError> {
    let auth_service = BrightPatternAuthService::instance()?;
    Ok(HttpResponse::Ok().json(auth_service.check_auth_status()))
}

/// # Endpoint
/// `GET /api/brightpattern/auth/info`
#[get("/auth/info")]
pub async fn auth_info() -> Result<HttpResponse, AppError> {
    log::info!("API 인증 정보 요청");
    let auth_service = BrightPatternAuthService::instance()?;
    Ok(HttpResponse::Ok().json(auth_service.token_info()))
}
