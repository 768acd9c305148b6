//! 이메일 인증 코드 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
