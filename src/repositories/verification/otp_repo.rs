//! # 인증 코드 리포지토리
//!
//! `verification_codes` 컬렉션에 대한 데이터 액세스 계층입니다.
//! 코드 문서는 캐시하지 않으며, 사용 처리는 `consumed: false`, `revoked != true`
//! 조건이 걸린 단일 `update_one`으로 수행되어 동시 요청 중 하나만 성공합니다.
//! 조회와 사용 처리 사이에 재발급으로 무효화된 코드도 이 조건에서 걸러집니다.
//!
//! ## 인덱스
//!
//! | 이름 | 키 | 용도 |
//! |------|----|------|
//! | `user_code_consumed` | `user_id, code, consumed` | 활성 코드 조회 |
//! | `expires_at_asc` | `expires_at` | 보존 기간 정리 |
//!
//! `(user_id, code)`에는 유니크 제약을 두지 않습니다.
//!
//! ## 재발송 쿨다운
//!
//! Redis 키 `verification:resend:{user_id}`를 `SET NX EX`로 잡아
//! 쿨다운 동안의 재발송을 막습니다.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
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
    domain::entities::verification::verification_code::{to_bson_datetime, VerificationCode},
    services::verification::traits::VerificationCodeStore,
};

#[repository(name = "otp", collection = "verification_codes")]
pub struct OtpRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

/// 사용자, 코드 값이 일치하고 아직 사용/무효화되지 않은 문서
pub fn active_code_filter(user_id: &ObjectId, code: &str) -> Document {
    doc! {
        "user_id": *user_id,
        "code": code,
        "consumed": false,
        "revoked": { "$ne": true },
    }
}

/// 미사용이고 무효화되지 않았을 때만 매칭되는 사용 처리 조건
pub fn unconsumed_filter(id: &ObjectId) -> Document {
    doc! { "_id": *id, "consumed": false, "revoked": { "$ne": true } }
}

pub fn consume_update(at: DateTime<Utc>) -> Document {
    doc! {
        "$set": {
            "consumed": true,
            "consumed_at": to_bson_datetime(at),
        }
    }
}

pub fn resend_cooldown_key(user_id: &ObjectId) -> String {
    format!("verification:resend:{}", user_id.to_hex())
}

impl OtpRepository {
    /// 재발송 쿨다운 슬롯을 잡습니다. 이미 쿨다운 중이면 `false`.
    pub async fn try_acquire_resend_slot(&self, user_id: &ObjectId, cooldown_seconds: u64) -> AppResult<bool> {
        if cooldown_seconds == 0 {
            return Ok(true);
        }

        self.redis
            .set_if_absent_with_expiry(&resend_cooldown_key(user_id), &Utc::now().timestamp(), cooldown_seconds)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    /// `before` 이전에 만료된 코드를 사용 여부와 관계없이 삭제합니다.
    pub async fn purge_stale(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = self
            .collection::<VerificationCode>()
            .delete_many(doc! { "expires_at": { "$lt": to_bson_datetime(before) } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let collection = self.collection::<VerificationCode>();

        let lookup_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "code": 1, "consumed": 1 })
            .options(IndexOptions::builder().name("user_code_consumed".to_string()).build())
            .build();

        let expiry_index = IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(IndexOptions::builder().name("expires_at_asc".to_string()).build())
            .build();

        collection
            .create_indexes([lookup_index, expiry_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl VerificationCodeStore for OtpRepository {
    async fn create(&self, code: VerificationCode) -> AppResult<ObjectId> {
        let result = self
            .collection::<VerificationCode>()
            .insert_one(&code)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("삽입된 인증 코드의 ID를 읽을 수 없습니다".to_string()))
    }

    async fn find_active(&self, user_id: &ObjectId, code: &str) -> AppResult<Option<VerificationCode>> {
        self.collection::<VerificationCode>()
            .find_one(active_code_filter(user_id, code))
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn mark_consumed(&self, id: &ObjectId, at: DateTime<Utc>) -> AppResult<bool> {
        let result = self
            .collection::<VerificationCode>()
            .update_one(unconsumed_filter(id), consume_update(at))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count == 1)
    }

    async fn revoke_active(&self, user_id: &ObjectId) -> AppResult<u64> {
        let result = self
            .collection::<VerificationCode>()
            .update_many(
                doc! { "user_id": *user_id, "consumed": false, "revoked": { "$ne": true } },
                doc! { "$set": { "revoked": true } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mongodb::bson::Bson;

    #[test]
    fn test_active_code_filter_excludes_consumed_and_revoked() {
        let user_id = ObjectId::new();
        let filter = active_code_filter(&user_id, "482913");

        assert_eq!(filter.get_object_id("user_id").unwrap(), user_id);
        assert_eq!(filter.get_str("code").unwrap(), "482913");
        assert_eq!(filter.get_bool("consumed").unwrap(), false);
        assert_eq!(filter.get_document("revoked").unwrap().get("$ne"), Some(&Bson::Boolean(true)));
        assert!(!filter.contains_key("expires_at"));
    }

    #[test]
    fn test_consume_is_conditional_on_unconsumed_and_unrevoked() {
        let id = ObjectId::new();
        let filter = unconsumed_filter(&id);
        assert_eq!(filter.get_object_id("_id").unwrap(), id);
        assert_eq!(filter.get_bool("consumed").unwrap(), false);
        assert_eq!(filter.get_document("revoked").unwrap().get("$ne"), Some(&Bson::Boolean(true)));

        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 0).unwrap();
        let update = consume_update(at);
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_bool("consumed").unwrap(), true);
        assert_eq!(set.get_datetime("consumed_at").unwrap(), &to_bson_datetime(at));
    }

    #[test]
    fn test_resend_cooldown_key() {
        let user_id = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(resend_cooldown_key(&user_id), "verification:resend:507f1f77bcf86cd799439011");
    }
}
