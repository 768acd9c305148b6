//! # 사용자 리포지토리 구현
//!
//! 계정 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 조회 캐싱을 지원합니다.
//! 이메일 인증 흐름에서는 [`IdentityStore`] 구현체로 쓰입니다.
//!
//! ## 특징
//!
//! - **하이브리드 스토리지**: MongoDB + Redis 캐싱
//! - **자동 의존성 주입**: 싱글톤 매크로를 통한 DI
//! - **쓰기 후 캐시 무효화**: 인증 완료 등 상태 변경 시 관련 캐시 제거

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::{
        errors::{AppError, AppResult},
        registry::Repository,
    },
    db::Database,
    domain::entities::users::user::User,
    services::verification::traits::IdentityStore,
};

/// 사용자 캐시 TTL (초)
const USER_CACHE_TTL_SECONDS: usize = 600;

/// 사용자 데이터 액세스 리포지토리
///
/// ## 캐싱 전략
///
/// ### L1 Cache (Redis)
/// - **TTL**: 10분 (600초)
/// - **키 패턴**:
///   - 개별 사용자: `user:{user_id}`
///   - 이메일 조회: `user:email:{email}`
///
/// ### L2 Storage (MongoDB)
/// - **컬렉션명**: `users`
/// - **인덱스**: email(unique), created_at(desc)
///
/// ## 에러 처리
///
/// - **DatabaseError**: MongoDB 연결 오류, 쿼리 실행 오류
/// - **ConflictError**: 이메일 중복
/// - **NotFound**: 인증 완료 처리 대상 사용자가 없음
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::repositories::users::user_repo::UserRepository;
///
/// let repo = UserRepository::instance();
/// let created = repo.create(User::new(email, first_name, last_name, password_hash)).await?;
/// let found = repo.find_by_email("ada@example.com").await?;
/// ```
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    redis: Arc<RedisClient>,
}

fn email_cache_key(email: &str) -> String {
    format!("user:email:{}", email)
}

impl UserRepository {
    /// 이메일 주소로 사용자 조회
    ///
    /// 캐시 우선 조회를 통해 성능을 최적화합니다.
    /// 이메일은 호출자가 정규화한 값이어야 합니다.
    ///
    /// # 캐싱 정책
    ///
    /// - **캐시 키**: `user:email:{email}`
    /// - **TTL**: 600초 (10분)
    /// - **캐시 미스**: MongoDB에서 조회 후 캐시에 저장
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(user)
    }

    /// 새 사용자 생성
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::ConflictError)` - 이메일 중복
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    ///
    /// 동시 가입 경쟁은 `email_unique` 인덱스가 막으며, 이때 발생하는
    /// 중복 키 오류도 `ConflictError`로 변환됩니다.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key_error(&e) {
                    AppError::ConflictError("이미 사용 중인 이메일입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        user.id = Some(result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("삽입된 사용자의 ID를 읽을 수 없습니다".to_string())
        })?);

        let _ = self.invalidate_collection_cache(None).await;

        Ok(user)
    }

    /// 사용자 정보 부분 업데이트
    ///
    /// `updated_at`을 함께 갱신하고, 변경 후 문서를 반환합니다.
    /// ID 캐시와 이메일 캐시를 모두 무효화합니다.
    async fn update(&self, id: &ObjectId, mut update_doc: Document) -> Result<Option<User>, AppError> {
        update_doc.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated_user = self.collection::<User>()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": update_doc })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = updated_user {
            let _ = self.invalidate_cache(&id.to_hex()).await;
            let _ = self.redis.del(&email_cache_key(&user.email)).await;
        }

        Ok(updated_user)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 1. **이메일 유니크 인덱스** (`email_unique`)
    /// 2. **생성일 인덱스** (`created_at_desc`)
    ///
    /// 애플리케이션 초기화 시점에 한 번 호출됩니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(e)) if e.code == 11000
    )
}

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn mark_verified(&self, user_id: &ObjectId) -> AppResult<()> {
        self.update(user_id, doc! { "is_email_verified": true })
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("인증 대상 사용자를 찾을 수 없습니다".to_string()))
    }
}
