//! BrightPattern 세션 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! 환경 설정을 검증한 뒤 OAuth/세션 자격 증명 서비스와 구독 클라이언트를
//! `ServiceLocator`에 등록합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use bp_session_service::config::{
    BrightPatternConfig, HttpClientConfig, OAuthClientConfig, ServerConfig, SubscriptionConfig,
};
use bp_session_service::core::registry::ServiceLocator;
use bp_session_service::errors::{AppError, AppResult};
use bp_session_service::http::{RequestExecutor, RetryPolicy};
use bp_session_service::routes::configure_all_routes;
use bp_session_service::services::auth::{BrightPatternAuthService, OAuthTokenService, ReauthCoordinator};
use bp_session_service::services::subscriptions::SubscriptionService;
use bp_session_service::utils::display_terminal::{
    print_banner, print_endpoint, print_ready, print_retry_policies, print_step,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 BrightPattern 세션 서비스 시작중...");

    if let Err(e) = initialize_services() {
        error!("서비스 초기화 실패: {}", e);
        return Err(std::io::Error::other(e.to_string()));
    }

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
/// 바인딩 주소는 `HOST`/`PORT` 환경 변수로 정합니다 (기본값 `127.0.0.1:8080`).
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/brightpattern", bind_address);

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// # 자격 증명 흐름만 debug (세션 토큰은 debug 레벨에서만 출력)
/// RUST_LOG=info,bp_session_service::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 설정을 검증하고 서비스를 생성해 `ServiceLocator`에 등록합니다
///
/// # Errors
///
/// * `AppError::InternalError` - 필수 환경 변수 누락 또는 HTTP 클라이언트 생성 실패
fn initialize_services() -> AppResult<()> {
    print_banner("BrightPattern Session Service");

    let http_config = HttpClientConfig::from_env();
    let oauth_config = OAuthClientConfig::from_env()?;
    let bright_pattern_config = BrightPatternConfig::from_env()?;
    let subscription_config = SubscriptionConfig::from_env();
    info!("HTTP 클라이언트 설정: {:?}", http_config);

    print_step(1, "Remote endpoints");
    print_endpoint("oauth", &oauth_config.token_url());
    print_endpoint("session", &bright_pattern_config.auth_url);
    print_endpoint("subscription", &subscription_config.base_url);
    print_endpoint("subscription data", &subscription_config.data_url());

    print_step(2, "Retry policies");
    print_retry_policies(&RetryPolicy::CALL_SITES);

    let executor = Arc::new(
        RequestExecutor::new(&http_config)
            .map_err(|e| AppError::InternalError(e.to_string()))?,
    );
    let oauth = Arc::new(OAuthTokenService::new(oauth_config, executor.clone()));
    let auth = Arc::new(BrightPatternAuthService::new(
        bright_pattern_config,
        oauth.clone(),
        executor.clone(),
    ));
    let coordinator = Arc::new(ReauthCoordinator::new(auth.clone()));
    let subscriptions = Arc::new(SubscriptionService::new(
        subscription_config,
        auth.clone(),
        coordinator.clone(),
        executor.clone(),
    ));

    ServiceLocator::set(executor);
    ServiceLocator::set(oauth);
    ServiceLocator::set(auth);
    ServiceLocator::set(coordinator);
    ServiceLocator::set(subscriptions);

    print_ready(ServiceLocator::registered_count(), &ServerConfig::bind_address());
    Ok(())
}

/// CORS 설정을 구성합니다
///
/// # Allowed Origins
///
/// * `http://localhost:3000` - 프론트엔드 개발 서버
/// * `http://localhost:8080` - 자체 서버
/// * `127.0.0.1` 동등한 주소들
fn configure_cors() -> Cors {
    Cors::default()
        // 허용할 Origin 설정
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")

        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])

        // 허용할 헤더
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])

        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
