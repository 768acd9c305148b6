//! # Domain Layer
//!
//! - [`entities`] - MongoDB 문서 엔티티 (`User`, `VerificationCode`)
//! - [`dto`] - HTTP 요청/응답 타입

pub mod entities;
pub mod dto;
