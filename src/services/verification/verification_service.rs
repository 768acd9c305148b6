//! # 이메일 인증 서비스
//!
//! 발급기([`CodeIssuer`])와 검증기([`VerificationCoordinator`])를 운영 구현체
//! (MongoDB 리포지토리, 메일 서비스, 시스템 시계, OS 난수원)와 엮어
//! 핸들러와 가입 흐름에 제공하는 싱글톤 서비스입니다.
//!
//! ## 흐름
//!
//! ```text
//! 가입 ──▶ start_verification ──▶ CodeIssuer ──▶ OtpRepository + MailService
//! 재발송 ─▶ resend_code (쿨다운) ─┘
//! 검증 ──▶ verify_email ─────────▶ VerificationCoordinator ──▶ UserRepository
//!                                   └─ 성공 시 환영 메일 (비동기, 실패 무시)
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use singleton_macro::service;

use super::{
    code_generator::{SecureCodeGenerator, SystemClock},
    coordinator::VerificationCoordinator,
    errors::VerificationError,
    issuer::{CodeIssuer, IssuedCode},
};
use crate::{
    config::VerificationSettings,
    core::errors::{AppError, AppResult},
    domain::{dto::verification::VerificationDispatchResponse, entities::users::user::User},
    repositories::{users::user_repo::UserRepository, verification::OtpRepository},
    services::mail::MailService,
    utils::string_utils::normalize_email,
};

#[service(name = "verification")]
pub struct VerificationService {
    otp_repo: Arc<OtpRepository>,
    user_repo: Arc<UserRepository>,
    mail_service: Arc<MailService>,
    /// 기동 시 `ServiceLocator::set`으로 등록된 설정
    settings: Arc<VerificationSettings>,
}

impl VerificationService {
    pub fn settings(&self) -> &VerificationSettings {
        &self.settings
    }

    fn issuer(&self) -> CodeIssuer {
        CodeIssuer::new(
            self.otp_repo.clone(),
            self.mail_service.clone(),
            Arc::new(SecureCodeGenerator),
            Arc::new(SystemClock),
            &self.settings,
        )
    }

    fn coordinator(&self) -> VerificationCoordinator {
        VerificationCoordinator::new(self.user_repo.clone(), self.otp_repo.clone())
    }

    /// 가입 직후 첫 인증 코드 발급
    ///
    /// 코드 인증이 꺼져 있으면 `None`. 계정은 이미 저장된 상태이므로 발급 실패는
    /// 가입을 실패시키지 않고 `verification_email_sent: false`로 보고됩니다.
    pub async fn start_verification(&self, user: &User) -> Option<VerificationDispatchResponse> {
        if !self.settings.by_code {
            return None;
        }

        let outcome = self.issuer().issue_code(user, self.settings.code_ttl_minutes).await;
        Some(signup_outcome(outcome))
    }

    /// 인증 코드 재발송
    ///
    /// # 반환값
    ///
    /// * `Ok(())` - 발송했거나, 대상이 없거나 이미 인증된 계정 (구분하지 않음)
    /// * `Err(AppError::ValidationError)` - 코드 인증이 꺼져 있음
    /// * `Err(AppError::RateLimited)` - 쿨다운 중
    pub async fn resend_code(&self, email: &str) -> AppResult<()> {
        if !self.settings.by_code {
            return Err(AppError::ValidationError("Email verification by code is disabled".to_string()));
        }

        let email = normalize_email(email);
        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) if !user.is_email_verified => user,
            Some(_) => {
                log::debug!("재발송 생략: 이미 인증된 계정");
                return Ok(());
            }
            None => {
                log::debug!("재발송 생략: 등록되지 않은 이메일");
                return Ok(());
            }
        };

        let user_id = user
            .id
            .ok_or_else(|| AppError::DatabaseError("사용자 문서에 _id가 없습니다".to_string()))?;

        if !self
            .otp_repo
            .try_acquire_resend_slot(&user_id, self.settings.resend_cooldown_seconds)
            .await?
        {
            return Err(AppError::RateLimited(
                "Please wait before requesting another code".to_string(),
            ));
        }

        let outcome = self.issuer().issue_code(&user, self.settings.code_ttl_minutes).await;
        dispatch_outcome(outcome).map(|_| ())
    }

    /// 제출된 코드 검증. 성공하면 설정에 따라 환영 메일을 백그라운드로 보냅니다.
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<User, VerificationError> {
        let user = self.coordinator().verify(email, code, Utc::now()).await?;

        if self.settings.send_welcome_email {
            let mail_service = self.mail_service.clone();
            let recipient = user.clone();
            actix_web::rt::spawn(async move {
                if let Err(e) = mail_service.send_welcome_email(&recipient).await {
                    log::warn!("환영 메일 발송 실패: {}", e);
                }
            });
        }

        Ok(user)
    }

    /// 보존 기간이 지난 코드 삭제. 보존 기간이 없으면 아무것도 지우지 않습니다.
    pub async fn purge_stale_codes(&self) -> AppResult<u64> {
        let Some(cutoff) = retention_cutoff(Utc::now(), self.settings.code_retention_days) else {
            return Ok(0);
        };

        let purged = self.otp_repo.purge_stale(cutoff).await?;
        if purged > 0 {
            log::info!("🧹 만료 인증 코드 {}건 정리 (기준: {})", purged, cutoff);
        }
        Ok(purged)
    }
}

/// 발급 결과를 가입/재발송 응답으로 변환합니다.
fn dispatch_outcome(
    outcome: Result<IssuedCode, VerificationError>,
) -> AppResult<VerificationDispatchResponse> {
    match outcome {
        Ok(issued) => Ok(VerificationDispatchResponse {
            verification_email_sent: true,
            verification_expires_at: Some(issued.expires_at),
        }),
        Err(VerificationError::NotificationDispatchFailed { code_id, expires_at, reason }) => {
            log::warn!("인증 메일 미발송 (code_id={}): {}", code_id, reason);
            Ok(VerificationDispatchResponse {
                verification_email_sent: false,
                verification_expires_at: Some(expires_at),
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// 가입 흐름용 변환. 코드 저장 실패도 에러 로그만 남기고 미발송으로 보고합니다.
fn signup_outcome(outcome: Result<IssuedCode, VerificationError>) -> VerificationDispatchResponse {
    dispatch_outcome(outcome).unwrap_or_else(|e| {
        log::error!("❌ 가입 직후 인증 코드 발급 실패 (재발송으로 복구 필요): {}", e);
        VerificationDispatchResponse {
            verification_email_sent: false,
            verification_expires_at: None,
        }
    })
}

/// `now - retention_days`. 보존 기간이 없거나 음수면 `None`.
fn retention_cutoff(now: DateTime<Utc>, retention_days: Option<i64>) -> Option<DateTime<Utc>> {
    let days = retention_days.filter(|days| *days >= 0)?;
    now.checked_sub_signed(Duration::try_days(days)?)
}
