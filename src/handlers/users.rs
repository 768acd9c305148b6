//! # User Registration HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/accounts/signup/` | 회원가입 | 201 Created |

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    core::errors::AppError,
    domain::dto::users::request::CreateUserRequest,
    handlers::invalid_payload_response,
    services::users::UserService,
};

/// 회원가입 핸들러
///
/// # 요청 본문
///
/// ```json
/// {
///   "email": "ada@example.com",
///   "password": "testpassword123",
///   "first_name": "Ada",
///   "last_name": "Lovelace"
/// }
/// ```
///
/// # 응답
///
/// ## 성공 (201 Created)
/// ```json
/// {
///   "user": { "id": "...", "email": "ada@example.com", "is_email_verified": false, ... },
///   "message": "Account created. Check your email for a verification code",
///   "verification": {
///     "verification_email_sent": true,
///     "verification_expires_at": "2024-05-01T09:10:00Z"
///   }
/// }
/// ```
///
/// `verification`은 코드 인증이 켜져 있을 때만 포함됩니다.
///
/// ## 실패
///
/// - 400: 입력 검증 실패 (`first_name`/`last_name` 누락 시 `"This field is required."`)
/// - 409: 이미 사용 중인 이메일
#[post("/signup")]
pub async fn signup(payload: web::Json<CreateUserRequest>) -> Result<HttpResponse, AppError> {
    if let Err(errors) = payload.validate() {
        return Ok(invalid_payload_response(&errors));
    }

    let service = UserService::instance();
    let response = service.create_user(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}
