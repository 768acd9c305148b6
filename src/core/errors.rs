//! # Application Error Handling
//!
//! 계정 서비스 전반에서 사용하는 공통 에러 타입입니다.
//! 데이터 계층(MongoDB, Redis), 입력 검증, 외부 연동(메일 API) 실패를
//! 하나의 `AppError`로 모으고, Actix-Web의 `ResponseError`를 구현하여
//! 핸들러에서 `?` 만으로 HTTP 응답까지 변환되도록 합니다.
//!
//! ## HTTP 상태 코드 매핑
//!
//! | 변형 | 상태 코드 |
//! |------|-----------|
//! | `ValidationError` | 400 Bad Request |
//! | `NotFound` | 404 Not Found |
//! | `ConflictError` | 409 Conflict |
//! | `RateLimited` | 429 Too Many Requests |
//! | 그 외 | 500 Internal Server Error |
//!
//! 응답 본문은 항상 `{"error": "<메시지>"}` 형태입니다.
//!
//! 이메일 인증 코드 검증 실패는 이 타입이 아니라
//! [`VerificationError`](crate::services::verification::VerificationError)로 표현되며,
//! 클라이언트에는 `{"detail": ...}` 형태로 응답합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn find(repo: &UserRepository, email: &str) -> AppResult<User> {
//!     repo.find_by_email(email)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Redis error: {0}")]
    RedisError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 재발송 쿨다운 등 요청 빈도 제한에 걸린 경우
    #[error("Too many requests: {0}")]
    RateLimited(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러 변형에 대응하는 HTTP 상태 코드
    pub fn status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.status()
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 문맥 메시지를 붙여 `AppError::InternalError`로 변환합니다.
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("이미 사용 중인 이메일입니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_rate_limited_response() {
        let error = AppError::RateLimited("잠시 후 다시 시도해주세요".to_string());
        assert_eq!(error.error_response().status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_infrastructure_errors_are_internal() {
        for error in [
            AppError::DatabaseError("connection refused".to_string()),
            AppError::RedisError("timeout".to_string()),
            AppError::ExternalServiceError("mail api down".to_string()),
        ] {
            assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            _ => panic!("Expected InternalError"),
        }
    }
}
