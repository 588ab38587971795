//! Request body decoding
//!
//! Handles conversion between client JSON and the raw `ToDoPayload`.

use crate::error::ApiError;
use ::todo_core::ToDoPayload;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Lowercase every top-level key of a JSON object.
///
/// When two keys fold to the same name, the later one wins.
pub fn fold_keys(body: Value) -> Value {
    match body {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

/// Decode a to-do body with case-insensitive member names
pub fn deserialize_todo_payload(body: Value) -> Result<ToDoPayload, ApiError> {
    deserialize_body(fold_keys(body))
}

/// Deserialize a request body, reporting decode failures as malformed input
pub fn deserialize_body<T>(body: Value) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(body).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_is_case_insensitive() {
        let body = json!({
            "Title": "Test",
            "EXPIRY": "2026-10-16",
            "completePercent": 25,
            "IsDone": true
        });

        let payload = deserialize_todo_payload(body).unwrap();
        assert_eq!(payload.title.as_deref(), Some("Test"));
        assert_eq!(payload.expiry.as_deref(), Some("2026-10-16"));
        assert_eq!(payload.complete_percent, Some(25.0));
        assert_eq!(payload.is_done, Some(true));
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let payload = deserialize_todo_payload(json!({})).unwrap();
        assert_eq!(payload, ToDoPayload::default());

        let payload = deserialize_todo_payload(json!({"description": null})).unwrap();
        assert_eq!(payload.description, None);
    }

    #[test]
    fn test_wrong_types_are_malformed() {
        let result = deserialize_todo_payload(json!({"title": 5}));
        assert!(matches!(result, Err(ApiError::MalformedBody(_))));

        let result = deserialize_todo_payload(json!(["not", "an", "object"]));
        assert!(matches!(result, Err(ApiError::MalformedBody(_))));
    }

    #[test]
    fn test_fold_keys_leaves_values_untouched() {
        let folded = fold_keys(json!({"Title": "MiXeD"}));
        assert_eq!(folded, json!({"title": "MiXeD"}));
        assert_eq!(fold_keys(json!(3)), json!(3));
    }
}
