//! # 인증 코드 발급기
//!
//! 새 코드를 만들어 저장한 뒤 사용자의 이메일로 보냅니다.
//!
//! ```text
//! issue_code(user, ttl)
//!   ├─ ttl <= 0                      → InvalidTtl
//!   ├─ (옵션) 이전 미사용 코드 무효화
//!   ├─ 코드 생성 (CSPRNG)
//!   ├─ 저장 (expires_at = now + ttl)
//!   └─ 발송 실패                      → NotificationDispatchFailed (저장된 코드는 유지)
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mongodb::bson::oid::ObjectId;

use super::{
    errors::VerificationError,
    traits::{Clock, CodeGenerator, Notifier, VerificationCodeStore},
};
use crate::{
    config::VerificationSettings,
    core::errors::AppError,
    domain::entities::{users::user::User, verification::verification_code::VerificationCode},
};

pub const VERIFICATION_SUBJECT: &str = "Verify your email address";

/// 발급 결과. 코드 값 자체는 메일로만 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    pub code_id: ObjectId,
    pub expires_at: DateTime<Utc>,
}

pub struct CodeIssuer {
    codes: Arc<dyn VerificationCodeStore>,
    notifier: Arc<dyn Notifier>,
    generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    invalidate_prior_on_reissue: bool,
}

impl CodeIssuer {
    pub fn new(
        codes: Arc<dyn VerificationCodeStore>,
        notifier: Arc<dyn Notifier>,
        generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
        settings: &VerificationSettings,
    ) -> Self {
        Self {
            codes,
            notifier,
            generator,
            clock,
            invalidate_prior_on_reissue: settings.invalidate_prior_on_reissue,
        }
    }

    pub async fn issue_code(&self, identity: &User, ttl_minutes: i64) -> Result<IssuedCode, VerificationError> {
        if ttl_minutes <= 0 {
            return Err(VerificationError::InvalidTtl(ttl_minutes));
        }
        let ttl = Duration::try_minutes(ttl_minutes).ok_or(VerificationError::InvalidTtl(ttl_minutes))?;

        let user_id = identity.id.ok_or_else(|| {
            AppError::ValidationError("저장되지 않은 사용자에게는 인증 코드를 발급할 수 없습니다".to_string())
        })?;

        if self.invalidate_prior_on_reissue {
            let revoked = self.codes.revoke_active(&user_id).await?;
            if revoked > 0 {
                log::debug!("이전 인증 코드 {}건 무효화: user={}", revoked, user_id);
            }
        }

        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(VerificationError::InvalidTtl(ttl_minutes))?;

        let code = self.generator.generate();
        let code_id = self
            .codes
            .create(VerificationCode::issue(user_id, code.clone(), issued_at, expires_at))
            .await?;

        log::info!("📨 인증 코드 발급: user={} code_id={} expires_at={}", user_id, code_id, expires_at);

        let body = verification_body(&identity.greeting_name(), &code, ttl_minutes);
        if let Err(e) = self.notifier.send(&identity.email, VERIFICATION_SUBJECT, &body).await {
            log::warn!("인증 메일 발송 실패: user={} code_id={} - {}", user_id, code_id, e);
            return Err(VerificationError::NotificationDispatchFailed {
                code_id,
                expires_at,
                reason: e.to_string(),
            });
        }

        Ok(IssuedCode { code_id, expires_at })
    }
}

/// 인증 메일 본문
pub fn verification_body(name: &str, code: &str, ttl_minutes: i64) -> String {
    format!(
        "Hello {name},\n\n\
         Your verification code is: {code}\n\n\
         The code expires in {ttl_minutes} minutes. \
         If you did not create an account, you can ignore this email."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_body_contains_code_and_ttl() {
        let body = verification_body("Ada", "482913", 10);

        assert!(body.starts_with("Hello Ada,"));
        assert!(body.contains("482913"));
        assert!(body.contains("10 minutes"));
    }
}
