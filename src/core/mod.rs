//! # Core Framework Module
//!
//! 서비스 전반이 공유하는 프레임워크 기능을 모아둔 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 싱글톤 인스턴스 저장소 겸 의존성 해결기
//! - **자동 레지스트리**: `#[service]`, `#[repository]` 매크로가 `inventory`로 등록
//! - **수동 등록**: `Database`, `RedisClient`, `VerificationSettings` 같은 인프라/설정 값
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ## 초기화 순서
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::core::registry::ServiceLocator;
//!
//! // 1. 인프라 및 설정 등록
//! ServiceLocator::set(Arc::new(Database::new().await?));
//! ServiceLocator::set(Arc::new(RedisClient::new().await?));
//! ServiceLocator::set(Arc::new(VerificationSettings::from_env()));
//!
//! // 2. 리포지토리 → 서비스 순으로 생성
//! ServiceLocator::initialize_all().await?;
//!
//! // 3. 이후 어디서든 싱글톤 접근
//! let verification = VerificationService::instance();
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
