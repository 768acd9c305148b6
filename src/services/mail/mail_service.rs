//! # 메일 발송 서비스
//!
//! 인증 코드 메일과 가입 환영 메일을 보냅니다.
//!
//! ## 백엔드
//!
//! | `EMAIL_BACKEND` | 동작 |
//! |-----------------|------|
//! | `console` | 메시지를 로그로만 출력 (로컬 개발/테스트 기본값) |
//! | `http` | `EMAIL_API_URL`로 JSON POST, `EMAIL_API_KEY` Bearer 인증 |
//!
//! HTTP 백엔드는 `EMAIL_MAX_RETRIES`번까지 선형 백오프(500ms × 시도 횟수)로
//! 재시도하며, 최종 실패 시 error 레벨로 기록하고 `ExternalServiceError`를 돌려줍니다.
//! 각 요청은 `EMAIL_TIMEOUT_SECONDS`(기본 10초)를 넘기면 실패로 처리됩니다.
//!
//! ```json
//! { "from": "admin@admin.com", "to": "ada@example.com", "subject": "[Accounts] ...", "text": "..." }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use singleton_macro::service;
use uuid::Uuid;

use crate::{
    config::{MailBackend, MailConfig},
    core::errors::{AppError, AppResult},
    domain::entities::users::user::User,
    services::verification::traits::Notifier,
};

pub const WELCOME_SUBJECT: &str = "Welcome to our app";
const RETRY_BASE_DELAY_MS: u64 = 500;

#[derive(Debug, Serialize)]
struct OutgoingMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[service(name = "mail")]
pub struct MailService {
    // 설정은 호출 시점에 MailConfig에서 읽음
}

impl MailService {
    /// 인증 완료 후 환영 메일
    pub async fn send_welcome_email(&self, user: &User) -> AppResult<()> {
        let body = welcome_body(&user.greeting_name());
        self.deliver(&user.email, WELCOME_SUBJECT, &body).await
    }

    async fn deliver(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let subject = prefixed_subject(&MailConfig::subject_prefix(), subject);
        let from = MailConfig::from_address();

        match MailConfig::backend() {
            MailBackend::Console => {
                log::info!(
                    "📧 [console mail {}] from={} to={} subject={}\n{}",
                    Uuid::new_v4(),
                    from,
                    to,
                    subject,
                    body
                );
                Ok(())
            }
            MailBackend::Http => {
                let mail = OutgoingMail { from: &from, to, subject: &subject, text: body };
                self.deliver_http(&mail).await
            }
        }
    }

    async fn deliver_http(&self, mail: &OutgoingMail<'_>) -> AppResult<()> {
        let api_url = MailConfig::api_url()
            .ok_or_else(|| AppError::ExternalServiceError("EMAIL_API_URL이 설정되지 않았습니다".to_string()))?;
        let api_key = MailConfig::api_key().unwrap_or_default();
        let max_retries = MailConfig::max_retries();

        let client = reqwest::Client::builder()
            .timeout(MailConfig::request_timeout())
            .build()
            .map_err(|e| AppError::ExternalServiceError(format!("메일 HTTP 클라이언트 생성 실패: {}", e)))?;
        let mut last_error = String::new();

        for attempt in 1..=max_retries.max(1) {
            let result = client
                .post(&api_url)
                .bearer_auth(&api_key)
                .json(mail)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    log::info!("📧 메일 발송 완료: to={} (시도 {})", mail.to, attempt);
                    return Ok(());
                }
                Ok(response) => {
                    let status = response.status();
                    let error_text = response.text().await.unwrap_or_default();
                    last_error = format!("HTTP {}: {}", status, error_text);
                }
                Err(e) => {
                    last_error = e.to_string();
                }
            }

            log::warn!("메일 발송 시도 {}/{} 실패: {}", attempt, max_retries, last_error);
            if attempt < max_retries {
                actix_web::rt::time::sleep(retry_delay(attempt)).await;
            }
        }

        log::error!("❌ 메일 발송 최종 실패: to={} - {}", mail.to, last_error);
        Err(AppError::ExternalServiceError(format!("메일 발송 실패: {}", last_error)))
    }
}

#[async_trait]
impl Notifier for MailService {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        self.deliver(to, subject, body).await
    }
}

pub fn prefixed_subject(prefix: &str, subject: &str) -> String {
    format!("{}{}", prefix, subject)
}

pub fn welcome_body(name: &str) -> String {
    format!("Hello {},\nIt's good to have you with us. Feel at home.", name)
}

/// n번째 실패 후 대기 시간
fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(RETRY_BASE_DELAY_MS * u64::from(attempt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_subject() {
        assert_eq!(prefixed_subject("[Accounts] ", "Verify your email address"), "[Accounts] Verify your email address");
        assert_eq!(prefixed_subject("", WELCOME_SUBJECT), "Welcome to our app");
    }

    #[test]
    fn test_welcome_body() {
        assert_eq!(welcome_body("Ada Lovelace"), "Hello Ada Lovelace,\nIt's good to have you with us. Feel at home.");
    }

    #[test]
    fn test_retry_delay_is_linear() {
        assert_eq!(retry_delay(1), Duration::from_millis(500));
        assert_eq!(retry_delay(3), Duration::from_millis(1500));
    }

    #[test]
    fn test_outgoing_mail_shape() {
        let mail = OutgoingMail { from: "admin@admin.com", to: "ada@example.com", subject: "s", text: "t" };
        let json = serde_json::to_value(&mail).unwrap();

        assert_eq!(json["from"], "admin@admin.com");
        assert_eq!(json["to"], "ada@example.com");
        assert_eq!(json["text"], "t");
    }
}
