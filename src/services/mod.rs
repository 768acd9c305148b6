//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로를 사용하여 싱글톤으로 관리되는 서비스들을 제공합니다.
//!
//! # Features
//!
//! - 회원가입 (`users`)
//! - 이메일 인증 코드 발급/검증/재발송 (`verification`)
//! - 메일 발송 (`mail`)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{users::UserService, verification::VerificationService};
//!
//! let user_service = UserService::instance();
//! let verification_service = VerificationService::instance();
//! ```

pub mod mail;
pub mod users;
pub mod verification;
