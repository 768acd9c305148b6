//! 인증 코드 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const EMAIL_VERIFIED_DETAIL: &str = "Email verified successfully";
pub const RESEND_ACCEPTED_DETAIL: &str =
    "If the account exists and is not yet verified, a new code has been sent";

/// `{"detail": "..."}` 형태의 단일 메시지 응답
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

/// 가입 응답에 포함되는 인증 메일 발송 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationDispatchResponse {
    /// false면 메일이 나가지 않은 상태 (재발송 필요)
    pub verification_email_sent: bool,
    /// 코드 저장 자체가 실패했으면 `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_expires_at: Option<DateTime<Utc>>,
}
