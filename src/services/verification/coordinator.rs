//! # 인증 코드 검증
//!
//! 제출된 (이메일, 코드) 쌍을 확인하고 성공 시 코드를 사용 처리한 뒤
//! 계정을 인증 완료 상태로 바꿉니다.
//!
//! ## 판정 순서
//!
//! 1. 이메일에 해당하는 계정이 없으면 `CodeInvalid`
//! 2. 코드 형식(6자리 숫자)이 아니면 `CodeInvalid`
//! 3. 일치하는 미사용 코드가 없으면 `CodeInvalid`
//! 4. `now >= expires_at` 이면 `CodeExpired`
//! 5. 사용 처리 CAS에 실패하면 `ConcurrentConsumption`
//! 6. 계정 인증 완료 처리. 여기서 실패하면 코드는 이미 사용된 상태이므로
//!    `code_id`와 함께 error 로그를 남기고, 사용자는 재발송으로 복구합니다.
//!
//! 코드 조회는 항상 해당 계정의 ID로 한정되므로 다른 계정에 발급된 코드는
//! 어떤 경우에도 일치하지 않습니다. 같은 코드에 대한 동시 요청 중
//! 정확히 하나만 성공합니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{
    errors::VerificationError,
    traits::{IdentityStore, VerificationCodeStore},
};
use crate::{
    core::errors::AppError,
    domain::entities::{users::user::User, verification::verification_code::is_well_formed_code},
    utils::string_utils::normalize_email,
};

pub struct VerificationCoordinator {
    identities: Arc<dyn IdentityStore>,
    codes: Arc<dyn VerificationCodeStore>,
}

impl VerificationCoordinator {
    pub fn new(identities: Arc<dyn IdentityStore>, codes: Arc<dyn VerificationCodeStore>) -> Self {
        Self { identities, codes }
    }

    /// 성공 시 인증 완료 상태의 계정을 돌려줍니다.
    pub async fn verify(
        &self,
        email: &str,
        submitted_code: &str,
        now: DateTime<Utc>,
    ) -> Result<User, VerificationError> {
        let email = normalize_email(email);

        let Some(mut identity) = self.identities.find_by_email(&email).await? else {
            log::debug!("인증 코드 거부: 등록되지 않은 이메일");
            return Err(VerificationError::CodeInvalid);
        };
        let user_id = identity
            .id
            .ok_or_else(|| AppError::DatabaseError("사용자 문서에 _id가 없습니다".to_string()))?;

        if !is_well_formed_code(submitted_code) {
            log::info!("인증 코드 거부: 형식 오류 user={}", user_id);
            return Err(VerificationError::CodeInvalid);
        }

        let Some(record) = self.codes.find_active(&user_id, submitted_code).await? else {
            log::info!("인증 코드 거부: 일치하는 코드 없음 user={}", user_id);
            return Err(VerificationError::CodeInvalid);
        };

        if record.is_expired_at(now) {
            log::info!("인증 코드 거부: 만료됨 user={} expired_at={}", user_id, record.expires_at_utc());
            return Err(VerificationError::CodeExpired);
        }

        let record_id = record
            .id
            .ok_or_else(|| AppError::DatabaseError("인증 코드 문서에 _id가 없습니다".to_string()))?;

        if !self.codes.mark_consumed(&record_id, now).await? {
            log::warn!("인증 코드 거부: 동시 요청이 먼저 사용함 user={} code_id={}", user_id, record_id);
            return Err(VerificationError::ConcurrentConsumption);
        }

        if let Err(e) = self.identities.mark_verified(&user_id).await {
            log::error!(
                "❌ 코드는 사용 처리됐지만 계정 인증 상태 저장 실패: user={} code_id={} error={}",
                user_id,
                record_id,
                e
            );
            return Err(e.into());
        }
        identity.is_email_verified = true;

        log::info!("✅ 이메일 인증 완료: user={}", user_id);
        Ok(identity)
    }
}
