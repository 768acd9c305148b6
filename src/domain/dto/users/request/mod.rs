//! 사용자 요청 DTO 모듈

pub mod create_user;

pub use create_user::CreateUserRequest;
