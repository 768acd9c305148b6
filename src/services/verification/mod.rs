//! 이메일 인증 코드 모듈
//!
//! - [`traits`]: 저장소, 메일, 시계, 코드 생성기 인터페이스
//! - [`issuer`]: 코드 발급 ([`CodeIssuer::issue_code`])
//! - [`coordinator`]: 코드 검증 ([`VerificationCoordinator::verify`])
//! - [`verification_service`]: 운영 구현체를 엮은 싱글톤 서비스
//!
//! 발급기와 검증기는 설정과 협력자를 생성 시점에 주입받으며
//! 전역 상태를 읽지 않습니다.
//!
//! ```rust,ignore
//! use crate::services::verification::VerificationService;
//!
//! let service = VerificationService::instance();
//! let user = service.verify_email("ada@example.com", "482913").await?;
//! ```

pub mod code_generator;
pub mod coordinator;
pub mod errors;
pub mod issuer;
pub mod traits;
pub mod verification_service;

#[cfg(test)]
mod tests;

pub use coordinator::VerificationCoordinator;
pub use errors::VerificationError;
pub use issuer::{CodeIssuer, IssuedCode};
pub use verification_service::VerificationService;
