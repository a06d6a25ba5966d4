//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 두 계층으로 나뉩니다.
//!
//! - [`AuthError`] - 자격 증명/세션 수명 주기 코어가 돌려주는 에러
//! - [`AppError`] - HTTP 경계에서 상태 코드로 변환되는 에러
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 의미 |
//! |----------|-------------|------|
//! | `ValidationError` | 400 Bad Request | 입력이 잘못됨 |
//! | `InvalidRequest` | 400 Bad Request | 지원하지 않는 요청 형식 |
//! | `NotAuthenticated` | 401 Unauthorized | 재인증을 시도했지만 세션이 없음 |
//! | `AuthenticationError` | 401 Unauthorized | 자격 증명/세션 응답이 잘못됨 |
//! | `NotFound` | 404 Not Found | 원격 리소스 없음 |
//! | `ExternalServiceError` | 500 Internal Server Error | 원격 서비스 장애 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! 인증 실패는 서버 장애(500), 입력 오류(400)와 구분되는 401로 드러납니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn fetch(id: &str) -> Result<SubscriptionResponse, AppError> {
//!     coordinator.ensure_authenticated().await?;   // AuthError -> AppError
//!     let reply = executor.execute(...).await?;    // RequestError -> AppError
//!     Ok(reply.json()?)
//! }
//! ```

use thiserror::Error;

use crate::http::RequestError;

/// 자격 증명 코어 에러
#[derive(Error, Debug)]
pub enum AuthError {
    /// 원격 호출 실패 (재시도 소진 후 마지막 원인 그대로)
    #[error(transparent)]
    Request(#[from] RequestError),

    /// 성공 응답이지만 토큰/세션 식별자를 찾지 못함 - 재시도하지 않음
    #[error("Schema extraction failed: {0}")]
    SchemaExtraction(String),

    /// 재인증을 시도했거나 기다렸지만 여전히 유효한 세션이 없음
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),
}

/// 애플리케이션 전역 에러 타입
///
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 지원하지 않는 요청 형식 (400 Bad Request)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 세션 확보 실패 (401 Unauthorized)
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문의 `error` 필드 값
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "ValidationError",
            AppError::InvalidRequest(_) => "InvalidRequest",
            AppError::NotAuthenticated(_) | AppError::AuthenticationError(_) => "Unauthorized",
            AppError::NotFound(_) => "NotFound",
            AppError::ExternalServiceError(_) => "ExternalServiceError",
            AppError::InternalError(_) => "InternalError",
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotAuthenticated(_) | AppError::AuthenticationError(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "error": self.code(),
            "message": self.to_string(),
        }))
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthenticated(msg) => AppError::NotAuthenticated(msg),
            AuthError::SchemaExtraction(msg) => AppError::AuthenticationError(msg),
            AuthError::Request(RequestError::RemoteRejection { status, body })
                if status == 401 || status == 403 =>
            {
                AppError::AuthenticationError(format!(
                    "자격 증명이 거절되었습니다 (status {}): {}",
                    status, body
                ))
            }
            AuthError::Request(e) => AppError::ExternalServiceError(e.to_string()),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::RemoteRejection { status: 404, body } => AppError::NotFound(body),
            other => AppError::ExternalServiceError(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;
