//! # 사용자 관리 서비스 구현
//!
//! 회원가입 비즈니스 로직을 구현합니다.
//!
//! ## 서비스 아키텍처
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                  UserService                  │
//! │ • 이메일 정규화   • 비밀번호 해싱   • DTO 변환   │
//! └───────────────┬───────────────────┬───────────┘
//!                 │                   │
//!                 ▼                   ▼
//! ┌──────────────────────┐ ┌──────────────────────────┐
//! │    UserRepository    │ │   VerificationService    │
//! │ • MongoDB + Redis    │ │ • 인증 코드 발급/메일 발송 │
//! └──────────────────────┘ └──────────────────────────┘
//! ```
//!
//! ## 비밀번호 보안
//!
//! - **bcrypt 해싱**: 적응형 해시 함수로 무차별 대입 공격 방지
//! - **환경별 Cost**: 개발/테스트는 낮게, 운영은 높게 (`PasswordConfig`)
//! - **민감 정보 제거**: 응답 DTO에는 비밀번호 해시가 포함되지 않음

use std::sync::Arc;

use bcrypt::hash;
use singleton_macro::service;

use crate::{
    config::PasswordConfig,
    core::errors::AppError,
    domain::{
        dto::users::{
            request::CreateUserRequest,
            response::{CreateUserResponse, UserResponse},
        },
        entities::users::user::User,
    },
    repositories::users::user_repo::UserRepository,
    services::verification::VerificationService,
    utils::string_utils::normalize_email,
};

pub const SIGNUP_MESSAGE: &str = "Account created successfully";
pub const SIGNUP_VERIFY_MESSAGE: &str = "Account created. Check your email for a verification code";

/// 회원가입 서비스
///
/// `#[service]` 매크로를 통해 싱글톤으로 관리되며,
/// `UserRepository`와 `VerificationService`가 자동 주입됩니다.
#[service(name = "user")]
pub struct UserService {
    /// 사용자 데이터 액세스 리포지토리
    user_repo: Arc<UserRepository>,

    /// 가입 직후 인증 코드 발급
    verification_service: Arc<VerificationService>,
}

impl UserService {
    /// 새 사용자 계정 생성
    ///
    /// # 처리 과정
    ///
    /// 1. 이메일 정규화 (도메인 소문자)
    /// 2. 환경별 cost로 bcrypt 해싱
    /// 3. 저장 (중복 이메일은 `ConflictError`)
    /// 4. 코드 인증이 켜져 있으면 인증 코드 발급 및 메일 발송
    ///
    /// 메일 발송이나 코드 저장 실패는 가입을 실패시키지 않으며, 응답의
    /// `verification.verification_email_sent`가 `false`가 됩니다. 사용자는 재발송으로 복구합니다.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<CreateUserResponse, AppError> {
        let start_time = std::time::Instant::now();

        let email = normalize_email(&request.email);

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = User::new(
            email,
            request.first_name.unwrap_or_default(),
            request.last_name.unwrap_or_default(),
            password_hash,
        );

        let created_user = self.user_repo.create(user).await?;
        log::info!("👤 사용자 생성: id={}", created_user.id_string().unwrap_or_default());

        let verification = self.verification_service.start_verification(&created_user).await;

        log::info!("Total user creation took: {:?}", start_time.elapsed());

        let message = if verification.is_some() { SIGNUP_VERIFY_MESSAGE } else { SIGNUP_MESSAGE };

        Ok(CreateUserResponse {
            user: UserResponse::from(created_user),
            message: message.to_string(),
            verification,
        })
    }
}
