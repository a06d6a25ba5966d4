//! # 문자열 유틸리티
//!
//! 문자열 처리와 관련된 공통 유틸리티 함수들입니다.

use crate::errors::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  sub-1  ", "subscription id").unwrap(), "sub-1");
/// assert!(validate_required_string("   ", "subscription id").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 비밀 값 마스킹
///
/// 앞 `visible`개 문자만 남기고 `***`를 붙입니다.
/// 전체 길이가 `visible` 이하라면 그대로 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(mask_secret("abcdefghijkl", 8), "abcdefgh***");
/// assert_eq!(mask_secret("short", 8), "short");
/// ```
pub fn mask_secret(value: &str, visible: usize) -> String {
    match value.char_indices().nth(visible) {
        Some((cut, _)) => format!("{}***", &value[..cut]),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("  sub-1  ", "id").unwrap(), "sub-1");
        assert!(matches!(
            validate_required_string("   ", "id"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefghijkl", 8), "abcdefgh***");
        assert_eq!(mask_secret("abcdefgh", 8), "abcdefgh");
        assert_eq!(mask_secret("", 8), "");
        assert_eq!(mask_secret("가나다라마바사아자차", 8), "가나다라마바사아***");
    }
}
