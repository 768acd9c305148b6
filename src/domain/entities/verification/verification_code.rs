//! VerificationCode Entity
//!
//! 한 사용자에게 발급된 이메일 인증 코드 한 건입니다.
//!
//! ## 상태 전이
//!
//! ```text
//!            verify (now < expires_at, CAS 성공)
//!  Issued ─────────────────────────────────────▶ Consumed   (terminal)
//!    │
//!    │ now >= expires_at
//!    ▼
//!  Expired  (terminal, 저장 상태 변경 없이 시각으로만 결정)
//! ```
//!
//! 사용된 코드는 만료 여부와 무관하게 다시 받아들이지 않고,
//! 만료된 코드는 사용 여부와 무관하게 받아들이지 않습니다.
//! `revoked`는 재발송 시 이전 코드 무효화 옵션이 켜진 경우에만 설정됩니다.

use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 코드 자릿수
pub const CODE_LENGTH: usize = 6;
/// 발급 가능한 최소값 (앞자리 0 없음)
pub const CODE_MIN: u32 = 100_000;
/// 발급 가능한 최대값
pub const CODE_MAX: u32 = 999_999;

/// 특정 시각 기준 코드 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeState {
    Issued,
    Consumed,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationCode {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub code: String,
    pub created_at: DateTime,
    pub expires_at: DateTime,
    pub consumed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_at: Option<DateTime>,
    #[serde(default)]
    pub revoked: bool,
}

/// chrono → bson 시각 (밀리초 정밀도)
pub fn to_bson_datetime(at: chrono::DateTime<Utc>) -> DateTime {
    DateTime::from_millis(at.timestamp_millis())
}

/// bson → chrono 시각
pub fn to_chrono_datetime(at: DateTime) -> chrono::DateTime<Utc> {
    chrono::DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or_default()
}

impl VerificationCode {
    /// `issued_at`에 발급되어 `expires_at`에 만료되는 미사용 코드
    pub fn issue(
        user_id: ObjectId,
        code: String,
        issued_at: chrono::DateTime<Utc>,
        expires_at: chrono::DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            user_id,
            code,
            created_at: to_bson_datetime(issued_at),
            expires_at: to_bson_datetime(expires_at),
            consumed: false,
            consumed_at: None,
            revoked: false,
        }
    }

    pub fn expires_at_utc(&self) -> chrono::DateTime<Utc> {
        to_chrono_datetime(self.expires_at)
    }

    /// `now >= expires_at` 이면 만료
    pub fn is_expired_at(&self, now: chrono::DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.expires_at.timestamp_millis()
    }

    pub fn state_at(&self, now: chrono::DateTime<Utc>) -> CodeState {
        if self.consumed {
            CodeState::Consumed
        } else if self.is_expired_at(now) {
            CodeState::Expired
        } else {
            CodeState::Issued
        }
    }

    /// 검증에 쓰일 수 있는 상태인지 (미사용, 미무효화, 미만료)
    pub fn is_usable_at(&self, now: chrono::DateTime<Utc>) -> bool {
        !self.revoked && self.state_at(now) == CodeState::Issued
    }
}

/// 코드 형식 검사: 정확히 6자리 ASCII 숫자, 100000-999999
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_digit())
        && code
            .parse::<u32>()
            .map(|value| (CODE_MIN..=CODE_MAX).contains(&value))
            .unwrap_or(false)
}
