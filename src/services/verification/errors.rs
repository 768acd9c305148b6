//! # 이메일 인증 에러
//!
//! 코드 발급/검증 흐름의 실패 원인을 구분하는 타입입니다.
//! 클라이언트에는 `{"detail": "<메시지>"}` 형태로만 노출됩니다.
//!
//! | 변형 | 상태 코드 | 구분 모드 메시지 | 통합 모드 메시지 |
//! |------|-----------|------------------|------------------|
//! | `CodeInvalid` | 400 | `Invalid code` | `Invalid or expired code` |
//! | `CodeExpired` | 400 | `Code expired` | `Invalid or expired code` |
//! | `ConcurrentConsumption` | 400 | `Invalid code` | `Invalid or expired code` |
//! | `NotificationDispatchFailed` | 502 | `Verification email could not be sent` | 동일 |
//! | `InvalidTtl`, `Storage` | 500 | `Internal server error` | 동일 |

use actix_web::{http::StatusCode, HttpResponse};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::{core::errors::AppError, domain::dto::verification::DetailResponse};

pub const INVALID_CODE_DETAIL: &str = "Invalid code";
pub const EXPIRED_CODE_DETAIL: &str = "Code expired";
pub const INVALID_OR_EXPIRED_DETAIL: &str = "Invalid or expired code";
pub const DISPATCH_FAILED_DETAIL: &str = "Verification email could not be sent";
const INTERNAL_DETAIL: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum VerificationError {
    /// 형식 오류, 미등록 이메일, 일치하는 미사용 코드 없음
    #[error("Invalid verification code")]
    CodeInvalid,

    #[error("Verification code expired")]
    CodeExpired,

    /// 같은 코드를 다른 요청이 먼저 사용함
    #[error("Verification code was consumed by a concurrent request")]
    ConcurrentConsumption,

    /// 코드는 저장되었으나 메일 발송 실패. 저장된 코드는 유효 기간 동안 그대로 남습니다.
    #[error("Verification code {code_id} stored but notification failed: {reason}")]
    NotificationDispatchFailed {
        code_id: ObjectId,
        expires_at: DateTime<Utc>,
        reason: String,
    },

    #[error("Verification code TTL must be a positive number of minutes, got {0}")]
    InvalidTtl(i64),

    #[error(transparent)]
    Storage(#[from] AppError),
}

impl VerificationError {
    /// 사용자가 제출한 코드가 거부된 경우인지
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            VerificationError::CodeInvalid
                | VerificationError::CodeExpired
                | VerificationError::ConcurrentConsumption
        )
    }

    pub fn status(&self) -> StatusCode {
        match self {
            VerificationError::CodeInvalid
            | VerificationError::CodeExpired
            | VerificationError::ConcurrentConsumption => StatusCode::BAD_REQUEST,
            VerificationError::NotificationDispatchFailed { .. } => StatusCode::BAD_GATEWAY,
            VerificationError::InvalidTtl(_) => StatusCode::INTERNAL_SERVER_ERROR,
            VerificationError::Storage(e) => e.status(),
        }
    }

    /// 클라이언트에 돌려줄 `detail` 메시지
    ///
    /// `distinct`가 꺼져 있으면 무효/만료를 구분하지 않습니다.
    pub fn client_detail(&self, distinct: bool) -> String {
        let detail = match self {
            VerificationError::CodeInvalid | VerificationError::ConcurrentConsumption if distinct => {
                INVALID_CODE_DETAIL
            }
            VerificationError::CodeExpired if distinct => EXPIRED_CODE_DETAIL,
            VerificationError::CodeInvalid
            | VerificationError::CodeExpired
            | VerificationError::ConcurrentConsumption => INVALID_OR_EXPIRED_DETAIL,
            VerificationError::NotificationDispatchFailed { .. } => DISPATCH_FAILED_DETAIL,
            VerificationError::Storage(e) if e.status().is_client_error() => {
                return e.to_string();
            }
            VerificationError::InvalidTtl(_) | VerificationError::Storage(_) => INTERNAL_DETAIL,
        };
        detail.to_string()
    }

    pub fn to_http_response(&self, distinct: bool) -> HttpResponse {
        HttpResponse::build(self.status()).json(DetailResponse::new(self.client_detail(distinct)))
    }
}

impl From<VerificationError> for AppError {
    fn from(error: VerificationError) -> Self {
        match error {
            VerificationError::Storage(inner) => inner,
            VerificationError::NotificationDispatchFailed { .. } => {
                AppError::ExternalServiceError(error.to_string())
            }
            VerificationError::InvalidTtl(_) => AppError::InternalError(error.to_string()),
            rejection => AppError::ValidationError(rejection.to_string()),
        }
    }
}
