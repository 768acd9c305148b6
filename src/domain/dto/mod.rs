//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 타입입니다. 요청 DTO는 `validator`로 검증합니다.
//!
//! - [`users`] - 회원가입 요청, 사용자 응답
//! - [`verification`] - 인증 코드 검증/재발송 요청, `{"detail": ...}` 응답

pub mod users;
pub mod verification;
