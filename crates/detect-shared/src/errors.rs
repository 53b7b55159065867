use crate::const_config::msg::MSG_LOGIN_REQUIRED;

/// Body the backend sends with every non-2xx response
///
/// Three shapes are understood:
/// - `{"detail": ...}` where `detail` is a string or a list of objects with a
///   `msg` field
/// - `{"error http": "401: ..."}` from the backend's HTTP exception handler
/// - `{"message": ..., "errors": [{"msg": ...}]}` from its validation handler
#[derive(Debug, Default, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
    #[serde(default, rename = "error http", skip_serializing_if = "Option::is_none")]
    pub error_http: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<serde_json::Value>>,
}

impl ErrorBody {
    pub fn new<S: Into<String>>(detail: S) -> Self {
        Self {
            detail: Some(serde_json::Value::String(detail.into())),
            ..Default::default()
        }
    }

    /// Returns the message to show the user if the body carried a usable one
    pub fn message(&self) -> Option<String> {
        let from_detail = match self.detail.as_ref() {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(serde_json::Value::Array(items)) => join_msgs(items),
            _ => None,
        };
        from_detail
            .or_else(|| self.error_http.as_deref().and_then(strip_status_prefix))
            .or_else(|| self.errors.as_deref().and_then(join_msgs))
    }
}

fn join_msgs(items: &[serde_json::Value]) -> Option<String> {
    let messages: Vec<&str> = items
        .iter()
        .filter_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
        .collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}

/// Drops the `401: ` style prefix the backend puts in front of the detail
fn strip_status_prefix(text: &str) -> Option<String> {
    let stripped = match text.split_once(": ") {
        Some((code, rest)) if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) => {
            rest
        }
        _ => text,
    };
    let stripped = stripped.trim();
    (!stripped.is_empty()).then(|| stripped.to_string())
}

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
#[error("{}", MSG_LOGIN_REQUIRED)]
pub struct NotLoggedInError;
