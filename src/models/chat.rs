use serde::{ Serialize, Deserialize };
use serde_json::Value;
use thiserror::Error;

/// Body failed the basic shape check: `message` was not text or `history`
/// was not a sequence. Checked synchronously, before any provider call.
#[derive(Debug, Error)]
#[error("Invalid input data")]
pub struct InvalidInput;

/// One prior conversation turn as the caller sends it. `role` stays in the
/// caller's vocabulary here; translation into the provider vocabulary
/// happens in the llm layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub role: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<HistoryEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ChatRequest {
    /// Extract a request from a raw JSON body. Only two things can fail the
    /// shape check: `message` not a string, `history` not an array. History
    /// entries are read leniently, with missing or mistyped fields becoming
    /// empty strings rather than errors, so malformed client data degrades
    /// instead of aborting the whole request.
    pub fn from_value(body: &Value) -> Result<Self, InvalidInput> {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .ok_or(InvalidInput)?
            .to_string();
        let history = body
            .get("history")
            .and_then(Value::as_array)
            .ok_or(InvalidInput)?
            .iter()
            .map(|entry| HistoryEntry {
                text: entry
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                role: entry
                    .get("role")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect();
        Ok(Self { message, history })
    }
}
