//! User Entity Implementation
//!
//! 계정 엔티티입니다. 이메일이 유일한 로그인 키이며 사용자명은 두지 않습니다.
//! `is_email_verified`는 인증 코드 검증 성공 시에만 `true`로 바뀝니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password_hash: String,
    /// 프로필 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    pub is_email_verified: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 가입 직후 상태의 일반 사용자 (활성, 이메일 미인증)
    pub fn new(email: String, first_name: String, last_name: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            first_name,
            last_name,
            password_hash,
            image: None,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            is_email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// "이름 성" 형태, 한쪽이 비어 있으면 있는 쪽만
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// 메일 인사말 등에 쓰는 이름. 이름이 없으면 이메일.
    pub fn greeting_name(&self) -> String {
        let full_name = self.full_name();
        if full_name.is_empty() {
            self.email.clone()
        } else {
            full_name
        }
    }
}
