//! 이메일 인증 코드 설정
//!
//! 환경 변수는 [`EmailVerificationConfig`]가 읽고, 인증 코어에는 읽어 둔 값을
//! [`VerificationSettings`]로 묶어 생성 시점에 넘깁니다. 코어는 환경 변수를
//! 직접 보지 않습니다.
//!
//! ```bash
//! EMAIL_VERIFICATION_BY_CODE=true
//! VERIFICATION_CODE_EXPIRATION_TIME=10          # 분
//! VERIFICATION_INVALIDATE_PRIOR_ON_REISSUE=false
//! VERIFICATION_DISTINCT_ERROR_MESSAGES=true
//! VERIFICATION_RESEND_COOLDOWN_SECONDS=60
//! VERIFICATION_CODE_RETENTION_DAYS=30           # 미설정 시 삭제하지 않음
//! SEND_WELCOME_EMAIL=true
//! ```

use std::env;

pub const DEFAULT_CODE_TTL_MINUTES: i64 = 10;
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: u64 = 60;

/// `true`/`1`/`yes`/`on` 을 참으로 해석. 미설정이거나 해석 불가면 `default`.
fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            other => {
                log::warn!("{} 값 '{}' 해석 실패. 기본값 {} 사용", key, other, default);
                default
            }
        },
        Err(_) => default,
    }
}

/// 환경 변수 기반 이메일 인증 설정
pub struct EmailVerificationConfig;

impl EmailVerificationConfig {
    /// 가입 시 코드 기반 인증을 사용할지 여부 (기본값: false, 링크 방식은 외부 처리)
    pub fn by_code() -> bool {
        env_flag("EMAIL_VERIFICATION_BY_CODE", false)
    }

    /// 코드 유효 시간(분). 0 이하이거나 숫자가 아니면 기본값 10분.
    pub fn code_expiration_minutes() -> i64 {
        match env::var("VERIFICATION_CODE_EXPIRATION_TIME") {
            Ok(value) => match value.trim().parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    log::warn!(
                        "VERIFICATION_CODE_EXPIRATION_TIME 값 '{}'이 올바르지 않습니다. 기본값 {}분 사용",
                        value,
                        DEFAULT_CODE_TTL_MINUTES
                    );
                    DEFAULT_CODE_TTL_MINUTES
                }
            },
            Err(_) => DEFAULT_CODE_TTL_MINUTES,
        }
    }

    /// 재발송 시 이전 활성 코드를 무효화할지 여부 (기본값: false)
    pub fn invalidate_prior_on_reissue() -> bool {
        env_flag("VERIFICATION_INVALIDATE_PRIOR_ON_REISSUE", false)
    }

    /// "Invalid code" / "Code expired" 를 구분해서 응답할지 여부 (기본값: false)
    ///
    /// false면 모든 거부를 "Invalid or expired code"로 응답합니다.
    pub fn distinct_error_messages() -> bool {
        env_flag("VERIFICATION_DISTINCT_ERROR_MESSAGES", false)
    }

    pub fn resend_cooldown_seconds() -> u64 {
        env::var("VERIFICATION_RESEND_COOLDOWN_SECONDS")
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(DEFAULT_RESEND_COOLDOWN_SECONDS)
    }

    /// 만료 후 이 일수가 지난 코드를 부팅 시 정리합니다. 미설정이면 보관.
    pub fn code_retention_days() -> Option<i64> {
        env::var("VERIFICATION_CODE_RETENTION_DAYS")
            .ok()
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|days| *days > 0)
    }

    pub fn send_welcome_email() -> bool {
        env_flag("SEND_WELCOME_EMAIL", true)
    }
}

/// 인증 코어에 주입되는 설정 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSettings {
    pub by_code: bool,
    pub code_ttl_minutes: i64,
    pub invalidate_prior_on_reissue: bool,
    pub distinct_error_messages: bool,
    pub resend_cooldown_seconds: u64,
    pub code_retention_days: Option<i64>,
    pub send_welcome_email: bool,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            by_code: false,
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
            invalidate_prior_on_reissue: false,
            distinct_error_messages: false,
            resend_cooldown_seconds: DEFAULT_RESEND_COOLDOWN_SECONDS,
            code_retention_days: None,
            send_welcome_email: true,
        }
    }
}

impl VerificationSettings {
    pub fn from_env() -> Self {
        Self {
            by_code: EmailVerificationConfig::by_code(),
            code_ttl_minutes: EmailVerificationConfig::code_expiration_minutes(),
            invalidate_prior_on_reissue: EmailVerificationConfig::invalidate_prior_on_reissue(),
            distinct_error_messages: EmailVerificationConfig::distinct_error_messages(),
            resend_cooldown_seconds: EmailVerificationConfig::resend_cooldown_seconds(),
            code_retention_days: EmailVerificationConfig::code_retention_days(),
            send_welcome_email: EmailVerificationConfig::send_welcome_email(),
        }
    }

    /// 부팅 로그용 요약
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("by_code", self.by_code.to_string()),
            ("code_ttl_minutes", self.code_ttl_minutes.to_string()),
            ("invalidate_prior_on_reissue", self.invalidate_prior_on_reissue.to_string()),
            ("distinct_error_messages", self.distinct_error_messages.to_string()),
            ("resend_cooldown_seconds", self.resend_cooldown_seconds.to_string()),
            (
                "code_retention_days",
                self.code_retention_days
                    .map(|days| days.to_string())
                    .unwrap_or_else(|| "keep".to_string()),
            ),
            ("send_welcome_email", self.send_welcome_email.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = VerificationSettings::default();

        assert!(!settings.by_code);
        assert_eq!(settings.code_ttl_minutes, 10);
        assert!(!settings.invalidate_prior_on_reissue);
        assert!(!settings.distinct_error_messages);
        assert_eq!(settings.code_retention_days, None);
    }

    #[test]
    fn test_env_flag_falls_back_to_default_when_unset() {
        assert!(env_flag("ACCOUNT_SERVICE_TEST_UNSET_FLAG", true));
        assert!(!env_flag("ACCOUNT_SERVICE_TEST_UNSET_FLAG", false));
    }

    #[test]
    fn test_summary_lists_every_setting() {
        let summary = VerificationSettings::default().summary();

        assert_eq!(summary.len(), 7);
        assert!(summary.contains(&("code_retention_days", "keep".to_string())));
    }
}
