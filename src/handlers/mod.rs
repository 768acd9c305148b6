//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청 DTO 검증과 응답 변환만 담당하고, 비즈니스 로직은
//! 싱글톤 서비스(`UserService::instance()` 등)에 위임합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`users`**: 회원가입 (`POST /signup/`)
//! - **`verification`**: 이메일 인증 코드 검증/재발송
//!   (`POST /verify-email-code/`, `POST /resend-email-code/`)
//!
//! ## 입력 검증 실패 응답
//!
//! 모든 핸들러는 요청 본문 검증 실패 시 같은 형태로 응답합니다.
//!
//! ```json
//! { "status": false, "detail": "Invalid data:", "error": { "email": [ ... ] } }
//! ```

use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::json;

pub mod users;
pub mod verification;

pub const INVALID_DATA_DETAIL: &str = "Invalid data:";

/// 400 `{"status": false, "detail": "Invalid data:", "error": ...}`
pub fn invalid_payload_response<E: Serialize>(errors: &E) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "status": false,
        "detail": INVALID_DATA_DETAIL,
        "error": errors,
    }))
}

/// JSON 파싱 실패(필드 누락, 타입 불일치 등)도 검증 실패와 같은 형태로 응답합니다.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = invalid_payload_response(&json!({ "body": [err.to_string()] }));
    actix_web::error::InternalError::from_response(err, response).into()
}
