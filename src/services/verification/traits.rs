//! 인증 흐름이 의존하는 협력자 인터페이스
//!
//! 운영 환경에서는 MongoDB 리포지토리와 메일 서비스가 구현하고,
//! 테스트에서는 메모리 구현으로 교체합니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use crate::{
    core::errors::AppResult,
    domain::entities::{users::user::User, verification::verification_code::VerificationCode},
};

/// 인증 코드 저장소
#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    /// 새 코드를 저장하고 할당된 ID를 돌려줍니다.
    async fn create(&self, code: VerificationCode) -> AppResult<ObjectId>;

    /// 해당 사용자에게 발급된, 값이 일치하고 아직 사용/무효화되지 않은 코드.
    /// 만료 여부는 거르지 않습니다.
    async fn find_active(&self, user_id: &ObjectId, code: &str) -> AppResult<Option<VerificationCode>>;

    /// 미사용 상태일 때만 사용 처리합니다 (compare-and-set).
    ///
    /// 이번 호출이 상태를 바꿨으면 `true`, 이미 사용된 코드였으면 `false`.
    async fn mark_consumed(&self, id: &ObjectId, at: DateTime<Utc>) -> AppResult<bool>;

    /// 사용자의 미사용 코드를 모두 무효화하고 그 개수를 돌려줍니다.
    async fn revoke_active(&self, user_id: &ObjectId) -> AppResult<u64>;
}

/// 인증 대상 계정 저장소
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn mark_verified(&self, user_id: &ObjectId) -> AppResult<()>;
}

/// 코드 전달 채널
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait CodeGenerator: Send + Sync {
    /// 6자리 숫자 코드 (100000-999999)
    fn generate(&self) -> String;
}
