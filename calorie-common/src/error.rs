//! Error bodies returned by the calorie service.

use serde::Deserialize;

/// Error payload of a failed request.
///
/// The service is inconsistent about which field carries the readable
/// text: some endpoints send `message`, others `error` (sometimes as an
/// object with its own `message`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Best human-readable message, `message` first, then `error`.
    pub fn message(&self) -> Option<String> {
        if let Some(message) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return Some(message.to_string());
        }
        match &self.error {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(serde_json::Value::Object(obj)) => obj
                .get("message")
                .and_then(|m| m.as_str())
                .map(|m| m.to_string()),
            _ => None,
        }
    }
}
