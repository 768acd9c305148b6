//! 계정 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결을 설정하고 회원가입/이메일 인증 REST API를 제공합니다.

use std::sync::Arc;

use account_service_backend::caching::redis::RedisClient;
use account_service_backend::config::{Environment, ServerConfig, VerificationSettings};
use account_service_backend::core::registry::ServiceLocator;
use account_service_backend::db::Database;
use account_service_backend::repositories::{users::user_repo::UserRepository, verification::OtpRepository};
use account_service_backend::routes::configure_all_routes;
use account_service_backend::services::verification::VerificationService;
use account_service_backend::utils::display_terminal::print_key_values;
use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    let env_source = load_env_file();
    init_logging();
    info!("Current profile: {}", env_source);

    info!("🚀 계정 서비스 시작중... (environment: {:?})", Environment::current());

    // 데이터 스토어 초기화
    let (database, redis_client) = initialize_data_stores().await?;

    // 인증 코드 정책
    let settings = VerificationSettings::from_env();
    print_key_values("✉️  EMAIL VERIFICATION SETTINGS", &settings.summary());

    // ServiceLocator에 핵심 컴포넌트 등록
    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);
    ServiceLocator::set(Arc::new(settings));

    // 모든 서비스 초기화
    ServiceLocator::initialize_all()
        .await
        .map_err(|e| startup_error("서비스 초기화 실패", e))?;

    prepare_collections().await?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server().await
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("❌ {}: {}", context, e);
    std::io::Error::other(format!("{}: {}", context, e))
}

/// 인덱스를 만들고 보존 기간이 지난 인증 코드를 정리합니다
///
/// 정리 실패는 기동을 막지 않습니다.
async fn prepare_collections() -> std::io::Result<()> {
    UserRepository::instance()
        .create_indexes()
        .await
        .map_err(|e| startup_error("users 인덱스 생성 실패", e))?;

    OtpRepository::instance()
        .create_indexes()
        .await
        .map_err(|e| startup_error("verification_codes 인덱스 생성 실패", e))?;

    info!("✅ 인덱스 준비 완료");

    if let Err(e) = VerificationService::instance().purge_stale_codes().await {
        warn!("만료 인증 코드 정리 실패: {}", e);
    }

    Ok(())
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, Rate Limiting, 로깅, 경로 정규화 미들웨어를 포함합니다.
/// 바인딩 주소와 워커 수는 `SERVER_HOST`, `SERVER_PORT`, `SERVER_WORKERS`로 정합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Accounts API: http://{}/api/v1/accounts", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| startup_error("Rate Limiting 설정 오류", "per_second와 burst_size는 0보다 커야 합니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// 로거 초기화 전에 호출되므로 결과를 문자열로 돌려주고, 로그는 호출자가 남깁니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() -> String {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let filename = match profile.as_str() {
        "prod" => ".env.prod",
        "dev" => ".env.dev",
        _ => {
            return match dotenv() {
                Ok(_) => format!("{} (.env 로드 됨)", profile),
                Err(e) => format!("{} (.env 로드 실패: {})", profile, e),
            };
        }
    };

    match dotenv::from_filename(filename) {
        Ok(_) => format!("{} ({} 로드 됨)", profile, filename),
        Err(e) => format!("{} ({} 로드 실패: {})", profile, filename, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=account_service_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
async fn initialize_data_stores() -> std::io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new()
        .await
        .map_err(|e| startup_error("데이터베이스 연결 실패", e))?;

    info!("✅ MongoDB 연결 성공 (database: {})", database.database_name());

    let redis_client = RedisClient::new()
        .await
        .map_err(|e| startup_error("Redis 연결 실패", e))?;

    info!("✅ Redis 연결 성공");

    Ok((Arc::new(database), Arc::new(redis_client)))
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
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
