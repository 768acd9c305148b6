//! # Domain Entities Module
//!
//! MongoDB 문서와 1:1로 매핑되는 도메인 엔티티입니다.
//!
//! ```text
//! entities/
//! ├── users/          ← User (계정, 인증 상태)
//! └── verification/   ← VerificationCode (이메일 인증 코드)
//! ```
//!
//! 관계: `User 1 ─── * VerificationCode` (`user_id` 참조)

pub mod users;
pub mod verification;
