//! API 라우트 설정 모듈
//!
//! 계정 관련 엔드포인트를 `/api/v1/accounts` 스코프로 묶고
//! 헬스체크 엔드포인트를 등록합니다. 경로 끝의 `/`는 `NormalizePath::trim()`
//! 미들웨어가 제거하므로 `/verify-email-code/`와 `/verify-email-code`는 같은 경로입니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::web;
use serde_json::json;

use crate::handlers;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_account_routes(cfg);
}

/// 계정 관련 라우트를 설정합니다
///
/// # Available Routes
///
/// - `POST /api/v1/accounts/signup/` - 회원가입
/// - `POST /api/v1/accounts/verify-email-code/` - 인증 코드 검증
/// - `POST /api/v1/accounts/resend-email-code/` - 인증 코드 재발송
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/accounts/verify-email-code/ \
///   -H "Content-Type: application/json" \
///   -d '{"email":"ada@example.com","code":"482913"}'
/// ```
fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/accounts")
            .app_data(web::JsonConfig::default().error_handler(handlers::json_error_handler))
            .service(handlers::users::signup)
            .service(handlers::verification::verify_email_code)
            .service(handlers::verification::resend_email_code),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "account_service",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z",
///   "features": {
///     "database": "MongoDB",
///     "cache": "Redis",
///     "dependency_injection": "Singleton Macro"
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "account_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
