//! Users Entity Module
//!
//! 이메일을 로그인/인증 키로 쓰는 [`User`](user::User) 엔티티를 정의합니다.

pub mod user;
