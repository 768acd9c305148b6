//! 애플리케이션 설정 모듈
//!
//! 모든 설정은 환경 변수(`.env.dev`, `.env.prod`)에서 읽습니다.
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩, bcrypt cost
//! - [`verification_config`] - 이메일 인증 코드 정책
//! - [`mail_config`] - 메일 백엔드와 발신자

pub mod data_config;
pub mod mail_config;
pub mod verification_config;

pub use data_config::*;
pub use mail_config::*;
pub use verification_config::*;
