//! # Redis 캐시 클라이언트
//!
//! 사용자 조회 캐시와 인증 코드 재발송 쿨다운에 쓰는 Redis 래퍼입니다.
//! 값은 serde_json 문자열로 저장되며, 모든 호출은 멀티플렉싱 연결 위에서
//! 비동기로 수행됩니다.
//!
//! ## 키 패턴
//!
//! | 키 | 용도 | TTL |
//! |----|------|-----|
//! | `user:{id}` | ID 기반 사용자 캐시 | 600초 |
//! | `user:email:{email}` | 이메일 기반 사용자 캐시 | 600초 |
//! | `verification:resend:{user_id}` | 재발송 쿨다운 마커 | 쿨다운 초 |

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

fn serialization_error(e: serde_json::Error) -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string()))
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 `PING`으로 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        Ok(Self { client })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        value
            .map(|json| serde_json::from_str(&json).map_err(serialization_error))
            .transpose()
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value).map_err(serialization_error)?;
        conn.set_ex(key, json, seconds as u64).await
    }

    /// 키가 없을 때만 만료 시간과 함께 저장합니다 (`SET key value NX EX seconds`).
    ///
    /// 저장에 성공하면 `true`, 이미 키가 있으면 `false`.
    pub async fn set_if_absent_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<bool, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value).map_err(serialization_error)?;

        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(json)
            .arg("NX")
            .arg("EX")
            .arg(seconds)
            .query_async(&mut conn)
            .await?;

        Ok(reply.is_some())
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(keys).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.keys(pattern).await
    }
}
