//! 사용자 관리 서비스 모듈
//!
//! 회원가입을 담당합니다. 가입 직후 이메일 인증 코드 발급은
//! [`VerificationService`](crate::services::verification::VerificationService)에 위임합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - 이메일 중복 방지
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::instance();
//! let response = user_service.create_user(request).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
