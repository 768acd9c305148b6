//! 사용자 응답 DTO
//!
//! 비밀번호 해시 등 민감 정보는 응답에 포함하지 않습니다.

use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::users::user::User;
use crate::domain::dto::verification::response::VerificationDispatchResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            first_name,
            last_name,
            image,
            is_active,
            is_email_verified,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            first_name,
            last_name,
            image,
            is_active,
            is_email_verified,
            created_at,
            updated_at,
        }
    }
}

/// 회원가입 응답
///
/// 코드 기반 인증이 꺼져 있으면 `verification`은 생략됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: UserResponse,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationDispatchResponse>,
}
