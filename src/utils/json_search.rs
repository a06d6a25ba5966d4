//! 스키마에 관대한 JSON 값 탐색
//!
//! BrightPattern 인증 응답은 세션 식별자와 만료 필드의 이름이나 위치가
//! 일정하지 않습니다. 여기서는 별칭 목록으로 깊이 우선 탐색을 수행합니다.
//!
//! 각 객체에서 먼저 별칭을 순서대로 확인하고, 일치하는 값이 없으면 자식 값을
//! 문서 순서대로 내려갑니다. 배열은 항목 순서대로 탐색합니다.
//!
//! ```text
//! {"data": {"sessionId": "abc", "expiresIn": 3600}}   -> "abc", 3600
//! {"result": [{"meta": {}}, {"token": "xyz"}]}        -> "xyz", 없음
//! ```

use serde_json::Value;

/// 세션 식별자 별칭 (우선순위 순)
pub const SESSION_ID_KEYS: &[&str] = &[
    "session_id",
    "sessionId",
    "session_token",
    "sessionToken",
    "token",
    "id",
];

/// 만료(초) 별칭 (우선순위 순)
pub const EXPIRY_KEYS: &[&str] = &["expires_in", "expiresIn", "expiry", "ttl"];

/// 별칭 중 하나에 있는, 공백이 아닌 첫 문자열 값을 찾습니다.
pub fn find_session_id(document: &Value) -> Option<String> {
    find_first(document, SESSION_ID_KEYS, &|value: &Value| match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        _ => None,
    })
}

/// 별칭 중 하나에 있는 첫 숫자 값을 초 단위로 찾습니다.
///
/// 정수가 아닌 숫자는 소수점 이하를 버립니다. 현재 객체의 별칭 값은 부호와
/// 무관하게 채택하지만, 자식에서 올라온 값은 양수일 때만 채택하고 0 이하이면
/// 다음 형제를 계속 탐색합니다.
pub fn find_expiry_seconds(document: &Value) -> Option<i64> {
    match document {
        Value::Object(map) => EXPIRY_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(as_seconds))
            .or_else(|| positive_in(map.values())),
        Value::Array(items) => positive_in(items.iter()),
        _ => None,
    }
}

fn positive_in<'a>(children: impl Iterator<Item = &'a Value>) -> Option<i64> {
    children
        .filter_map(find_expiry_seconds)
        .find(|seconds| *seconds > 0)
}

fn as_seconds(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(seconds) = number.as_i64() {
        return Some(seconds);
    }
    if let Some(seconds) = number.as_u64() {
        return Some(i64::try_from(seconds).unwrap_or(i64::MAX));
    }
    number
        .as_f64()
        .filter(|seconds| seconds.is_finite())
        .map(|seconds| seconds as i64)
}

/// `accept`가 받아들이는 첫 값을 반환합니다.
///
/// 별칭 키가 있더라도 `accept`가 거절하면 그 값은 건너뛰고 탐색을 계속합니다.
pub fn find_first<T>(
    node: &Value,
    keys: &[&str],
    accept: &dyn Fn(&Value) -> Option<T>,
) -> Option<T> {
    match node {
        Value::Object(map) => {
            for key in keys {
                if let Some(found) = map.get(*key).and_then(accept) {
                    return Some(found);
                }
            }
            map.values().find_map(|child| find_first(child, keys, accept))
        }
        Value::Array(items) => items.iter().find_map(|item| find_first(item, keys, accept)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_fields() {
        let doc = json!({"session_id": "abc", "expires_in": 3600});
        assert_eq!(find_session_id(&doc).as_deref(), Some("abc"));
        assert_eq!(find_expiry_seconds(&doc), Some(3600));
    }

    #[test]
    fn test_nested_camel_case_fields() {
        let doc = json!({"data": {"sessionId": "abc", "expiresIn": 3600}});
        assert_eq!(find_session_id(&doc).as_deref(), Some("abc"));
        assert_eq!(find_expiry_seconds(&doc), Some(3600));
    }

    #[test]
    fn test_token_inside_array_without_expiry() {
        let doc = json!({"result": [{"meta": {}}, {"token": "xyz"}]});
        assert_eq!(find_session_id(&doc).as_deref(), Some("xyz"));
        assert_eq!(find_expiry_seconds(&doc), None);
    }

    #[test]
    fn test_no_recognisable_fields() {
        let doc = json!({"status": "ok", "items": [1, 2, 3]});
        assert_eq!(find_session_id(&doc), None);
        assert_eq!(find_expiry_seconds(&doc), None);
    }

    #[test]
    fn test_alias_priority_within_one_object() {
        let doc = json!({"id": "low", "token": "mid", "sessionToken": "high"});
        assert_eq!(find_session_id(&doc).as_deref(), Some("high"));
    }

    #[test]
    fn test_object_aliases_win_over_nested_children() {
        let doc = json!({"inner": {"session_id": "deep"}, "id": "shallow"});
        assert_eq!(find_session_id(&doc).as_deref(), Some("shallow"));
    }

    #[test]
    fn test_children_visited_in_document_order() {
        let doc = json!({"first": {"token": "one"}, "second": {"session_id": "two"}});
        assert_eq!(find_session_id(&doc).as_deref(), Some("one"));
    }

    #[test]
    fn test_blank_and_non_string_ids_are_skipped() {
        let doc = json!({"id": 42, "token": "  ", "nested": {"sessionId": "real"}});
        assert_eq!(find_session_id(&doc).as_deref(), Some("real"));
    }

    #[test]
    fn test_fractional_expiry_is_truncated() {
        let doc = json!({"ttl": 90.9});
        assert_eq!(find_expiry_seconds(&doc), Some(90));
    }

    #[test]
    fn test_string_expiry_is_ignored() {
        let doc = json!({"expires_in": "3600", "data": {"ttl": 120}});
        assert_eq!(find_expiry_seconds(&doc), Some(120));
    }

    #[test]
    fn test_non_positive_child_expiry_keeps_searching() {
        let doc = json!({"a": {"ttl": 0}, "b": {"ttl": 3600}});
        assert_eq!(find_expiry_seconds(&doc), Some(3600));

        let doc = json!({"items": [{"expires_in": -5}, {"expiresIn": 120}]});
        assert_eq!(find_expiry_seconds(&doc), Some(120));
    }

    #[test]
    fn test_non_positive_expiry_on_same_object_is_returned() {
        let doc = json!({"ttl": 0, "data": {"expires_in": 3600}});
        assert_eq!(find_expiry_seconds(&doc), Some(0));

        let doc = json!({"data": {"ttl": 0}});
        assert_eq!(find_expiry_seconds(&doc), None);
    }

    #[test]
    fn test_scalar_root_yields_nothing() {
        assert_eq!(find_session_id(&json!("token")), None);
        assert_eq!(find_expiry_seconds(&Value::Null), None);
    }
}
