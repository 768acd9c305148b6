//! 사용자 데이터 액세스 계층
//!
//! [`UserRepository`](user_repo::UserRepository)를 통해 MongoDB 기반 사용자 데이터 관리와
//! Redis 캐싱을 제공합니다.

pub mod user_repo;
