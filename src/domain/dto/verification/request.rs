//! 인증 코드 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::string_utils::deserialize_string_or_integer;

/// `POST /verify-email-code/`
///
/// 코드 형식(6자리 숫자) 검사는 검증 코어가 담당하며, 형식이 틀린 코드도
/// "Invalid code"로 응답합니다. 여기서는 필드 존재와 이메일 형식만 봅니다.
/// `code`는 `"482913"`과 `482913` 두 형태를 모두 받습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailCodeRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[serde(deserialize_with = "deserialize_string_or_integer")]
    #[validate(length(min = 1, max = 32, message = "This field may not be blank."))]
    pub code: String,
}

/// `POST /resend-email-code/`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendEmailCodeRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
}
