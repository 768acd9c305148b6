//! # Email Verification HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/api/v1/accounts/verify-email-code/` | 인증 코드 검증 |
//! | `POST` | `/api/v1/accounts/resend-email-code/` | 인증 코드 재발송 |
//!
//! 검증 실패 메시지는 `VERIFICATION_DISTINCT_ERROR_MESSAGES` 설정에 따라
//! `Invalid code`/`Code expired`로 구분되거나 `Invalid or expired code` 하나로 통합됩니다.

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    core::errors::AppError,
    domain::dto::verification::{
        DetailResponse, ResendEmailCodeRequest, VerifyEmailCodeRequest, EMAIL_VERIFIED_DETAIL,
        RESEND_ACCEPTED_DETAIL,
    },
    handlers::invalid_payload_response,
    services::verification::VerificationService,
};

/// 인증 코드 검증 핸들러
///
/// # 응답
///
/// | 상태 | 본문 |
/// |------|------|
/// | 200 | `{"detail": "Email verified successfully"}` |
/// | 400 | `{"detail": "Invalid or expired code"}` (통합 모드, 기본값) |
/// | 400 | `{"detail": "Invalid code"}` / `{"detail": "Code expired"}` (구분 모드) |
/// | 400 | `{"status": false, "detail": "Invalid data:", "error": {...}}` |
/// | 500 | `{"detail": "Internal server error"}` |
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/accounts/verify-email-code/ \
///   -H "Content-Type: application/json" \
///   -d '{"email": "ada@example.com", "code": "482913"}'
/// ```
#[post("/verify-email-code")]
pub async fn verify_email_code(payload: web::Json<VerifyEmailCodeRequest>) -> HttpResponse {
    if let Err(errors) = payload.validate() {
        return invalid_payload_response(&errors);
    }

    let request = payload.into_inner();
    let service = VerificationService::instance();

    match service.verify_email(&request.email, &request.code).await {
        Ok(_) => HttpResponse::Ok().json(DetailResponse::new(EMAIL_VERIFIED_DETAIL)),
        Err(e) => {
            if !e.is_rejection() {
                log::error!("이메일 인증 처리 실패: {}", e);
            }
            e.to_http_response(service.settings().distinct_error_messages)
        }
    }
}

/// 인증 코드 재발송 핸들러
///
/// 등록되지 않았거나 이미 인증된 이메일에도 같은 200 응답을 돌려줍니다.
///
/// - 400: 코드 인증이 꺼져 있음
/// - 429: 재발송 쿨다운 중
#[post("/resend-email-code")]
pub async fn resend_email_code(payload: web::Json<ResendEmailCodeRequest>) -> Result<HttpResponse, AppError> {
    if let Err(errors) = payload.validate() {
        return Ok(invalid_payload_response(&errors));
    }

    VerificationService::instance().resend_code(&payload.email).await?;

    Ok(HttpResponse::Ok().json(DetailResponse::new(RESEND_ACCEPTED_DETAIL)))
}
