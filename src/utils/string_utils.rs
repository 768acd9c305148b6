//! # 문자열 유틸리티
//!
//! 요청 데이터 정리에 쓰는 공통 함수들입니다.

use serde::Deserialize;

/// 이메일 주소 정규화
///
/// 앞뒤 공백을 제거하고 도메인 부분(`@` 뒤)만 소문자로 바꿉니다.
/// 로컬 파트는 대소문자를 구분할 수 있으므로 그대로 둡니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(normalize_email("  Alice@Example.COM "), "Alice@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    let trimmed = email.trim();
    match trimmed.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => trimmed.to_string(),
    }
}

/// 선택적 문자열 필드 정리
///
/// None, 빈 문자열, 공백만 있는 경우 None을 반환하고
/// 그 외에는 앞뒤 공백을 제거한 값을 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde 역직렬화용 선택적 문자열 정리
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct SignupRequest {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     first_name: Option<String>,
/// }
///
/// // {"first_name": "  Ada  "} → Some("Ada")
/// // {"first_name": "   "}     → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// JSON 문자열 또는 정수를 문자열로 받는 역직렬화 함수
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct VerifyRequest {
///     #[serde(deserialize_with = "deserialize_string_or_integer")]
///     code: String,
/// }
///
/// // {"code": "482913"} → "482913"
/// // {"code": 482913}   → "482913"
/// ```
pub fn deserialize_string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInteger {
        Text(String),
        Integer(i64),
    }

    Ok(match StringOrInteger::deserialize(deserializer)? {
        StringOrInteger::Text(s) => s,
        StringOrInteger::Integer(n) => n.to_string(),
    })
}
