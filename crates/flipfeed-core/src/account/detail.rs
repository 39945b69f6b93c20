use serde_json::Value;

/// Shown when the auth backend rejects an update without a usable reason
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update profile";

/// Turn the `detail` field of an error response into one readable line.
///
/// Validation errors arrive as a list of `{msg}` objects, a single object,
/// or a plain string.
pub fn describe_detail(detail: &Value) -> String {
    let message = match detail {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(msg_text))
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(map) => map
            .get("msg")
            .and_then(msg_text)
            .unwrap_or_else(|| detail.to_string()),
        Value::String(s) => s.clone(),
        _ => String::new(),
    };

    if message.trim().is_empty() {
        UPDATE_FAILED_MESSAGE.to_string()
    } else {
        message
    }
}

/// Text of a `msg` value; blank strings, zero, false and null count as absent
fn msg_text(msg: &Value) -> Option<String> {
    match msg {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(_) | Value::Object(_) => Some(msg.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_of_messages_is_joined() {
        let detail = json!([
            { "loc": ["body", "email"], "msg": "value is not a valid email address" },
            { "loc": ["body"] },
            { "msg": "field required" }
        ]);
        assert_eq!(
            describe_detail(&detail),
            "value is not a valid email address field required"
        );
    }

    #[test]
    fn test_object_uses_msg_or_json() {
        assert_eq!(describe_detail(&json!({ "msg": "Email taken" })), "Email taken");
        assert_eq!(describe_detail(&json!({ "code": 7 })), r#"{"code":7}"#);
    }

    #[test]
    fn test_non_string_msg() {
        assert_eq!(describe_detail(&json!({ "msg": 5 })), "5");
        assert_eq!(describe_detail(&json!({ "msg": true })), "true");
        assert_eq!(describe_detail(&json!([{ "msg": 5 }, { "msg": "too small" }])), "5 too small");
        // An unusable msg falls back to the whole object
        assert_eq!(
            describe_detail(&json!({ "msg": null, "code": 1 })),
            r#"{"code":1,"msg":null}"#
        );
        assert_eq!(
            describe_detail(&json!({ "msg": "", "code": 1 })),
            r#"{"code":1,"msg":""}"#
        );
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(describe_detail(&json!("Not authenticated")), "Not authenticated");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(describe_detail(&json!("")), UPDATE_FAILED_MESSAGE);
        assert_eq!(describe_detail(&json!([])), UPDATE_FAILED_MESSAGE);
        assert_eq!(describe_detail(&json!(null)), UPDATE_FAILED_MESSAGE);
        assert_eq!(describe_detail(&json!(42)), UPDATE_FAILED_MESSAGE);
    }
}
