//! 메일 발송 설정
//!
//! 메일 백엔드 종류와 발신자 정보를 환경 변수에서 읽습니다.
//!
//! # Environment Variables
//!
//! | 변수 | 기본값 | 설명 |
//! |------|--------|------|
//! | `EMAIL_BACKEND` | 로컬 환경 `console`, 그 외 `http` | 발송 방식 |
//! | `DEFAULT_FROM_EMAIL` | `admin@admin.com` | 발신 주소 |
//! | `EMAIL_SUBJECT_PREFIX` | `[Accounts] ` | 제목 접두사 |
//! | `EMAIL_API_URL` | - | `http` 백엔드의 발송 엔드포인트 |
//! | `EMAIL_API_KEY` | - | `Authorization: Bearer` 값 |
//! | `EMAIL_MAX_RETRIES` | `3` | `http` 백엔드 재시도 횟수 |
//! | `EMAIL_TIMEOUT_SECONDS` | `10` | `http` 백엔드 요청당 타임아웃 |

use std::{env, time::Duration};
use super::data_config::Environment;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 메일 발송 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailBackend {
    /// 로그로만 출력 (개발용)
    Console,
    /// JSON HTTP API 호출
    Http,
}

impl MailBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "console" => Some(MailBackend::Console),
            "http" | "api" => Some(MailBackend::Http),
            _ => None,
        }
    }
}

pub struct MailConfig;

impl MailConfig {
    pub fn backend() -> MailBackend {
        env::var("EMAIL_BACKEND")
            .ok()
            .and_then(|value| MailBackend::parse(&value))
            .unwrap_or_else(|| Self::backend_for_env(&Environment::current()))
    }

    pub fn backend_for_env(env: &Environment) -> MailBackend {
        if env.is_local() {
            MailBackend::Console
        } else {
            MailBackend::Http
        }
    }

    pub fn from_address() -> String {
        env::var("DEFAULT_FROM_EMAIL").unwrap_or_else(|_| "admin@admin.com".to_string())
    }

    pub fn subject_prefix() -> String {
        env::var("EMAIL_SUBJECT_PREFIX").unwrap_or_else(|_| "[Accounts] ".to_string())
    }

    pub fn api_url() -> Option<String> {
        env::var("EMAIL_API_URL").ok().filter(|url| !url.trim().is_empty())
    }

    pub fn api_key() -> Option<String> {
        env::var("EMAIL_API_KEY").ok().filter(|key| !key.trim().is_empty())
    }

    pub fn max_retries() -> u32 {
        env::var("EMAIL_MAX_RETRIES")
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(3)
    }

    /// 0이나 잘못된 값이면 기본값 10초
    pub fn request_timeout() -> Duration {
        let seconds = env::var("EMAIL_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|seconds| *seconds > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        Duration::from_secs(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_backend_parse() {
        assert_eq!(MailBackend::parse("console"), Some(MailBackend::Console));
        assert_eq!(MailBackend::parse(" HTTP "), Some(MailBackend::Http));
        assert_eq!(MailBackend::parse("smtp"), None);
    }

    #[test]
    fn test_request_timeout_is_bounded() {
        // EMAIL_TIMEOUT_SECONDS가 없는 테스트 환경에서는 기본값
        if env::var("EMAIL_TIMEOUT_SECONDS").is_err() {
            assert_eq!(MailConfig::request_timeout(), Duration::from_secs(10));
        }
        assert!(MailConfig::request_timeout() > Duration::ZERO);
    }

    #[test]
    fn test_backend_defaults_per_environment() {
        assert_eq!(MailConfig::backend_for_env(&Environment::Development), MailBackend::Console);
        assert_eq!(MailConfig::backend_for_env(&Environment::Production), MailBackend::Http);
    }
}
