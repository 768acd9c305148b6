//! # 회원가입 요청 DTO
//!
//! ## 검증 규칙
//!
//! ### 이메일 (`email`)
//! - 이메일 형식, 중복 여부는 리포지토리에서 확인
//! - 저장 전 도메인 부분을 소문자로 정규화
//!
//! ### 이름 (`first_name`, `last_name`)
//! - 둘 다 필수, 각각 최대 150자, 앞뒤 공백 제거
//! - 공백만 있는 값은 누락으로 취급
//!
//! ### 비밀번호 (`password`)
//! - 단일 필드, 최소 8자
//!
//! ```json
//! {
//!   "email": "ada@example.com",
//!   "password": "testpassword123",
//!   "first_name": "Ada",
//!   "last_name": "Lovelace"
//! }
//! ```

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

pub const FIELD_REQUIRED_MESSAGE: &str = "This field is required.";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[validate(length(min = 8, message = "This password is too short. It must contain at least 8 characters."))]
    pub password: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(required(message = "This field is required."), length(max = 150, message = "이름은 150자 이하여야 합니다"))]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(required(message = "This field is required."), length(max = 150, message = "성은 150자 이하여야 합니다"))]
    pub last_name: Option<String>,
}
