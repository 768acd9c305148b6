//! 메일 발송 모듈
//!
//! [`MailService`]는 인증 흐름의 [`Notifier`](crate::services::verification::traits::Notifier) 구현체입니다.

pub mod mail_service;

pub use mail_service::MailService;
