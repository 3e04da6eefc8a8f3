pub mod gemini;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::chat::HistoryEntry;

/// The two-valued role vocabulary the provider understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalRole {
    User,
    Model,
}

impl CanonicalRole {
    /// Total mapping from the caller's raw role string. `"bot"` is the only
    /// value that lands on the model side; every other value, including ones
    /// the caller should never have sent, defaults to `User` so malformed
    /// history degrades instead of failing the request.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "bot" => CanonicalRole::Model,
            "user" => CanonicalRole::User,
            _ => CanonicalRole::User,
        }
    }
}

/// One provider-facing conversation turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderTurn {
    pub role: CanonicalRole,
    pub text: String,
}

impl From<&HistoryEntry> for ProviderTurn {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            role: CanonicalRole::from_raw(&entry.role),
            text: entry.text.clone(),
        }
    }
}

/// A single-use provider session: the seed instruction, then the caller's
/// translated history. Built per request and discarded after the call.
#[derive(Clone, Debug)]
pub struct ChatSession {
    turns: Vec<ProviderTurn>,
}

impl ChatSession {
    /// `system_prompt` is the fixed persona seed, passed in explicitly. It
    /// becomes the first user-role turn of the session.
    pub fn new(system_prompt: &str, history: &[HistoryEntry]) -> Self {
        let mut turns = Vec::with_capacity(history.len() + 1);
        turns.push(ProviderTurn {
            role: CanonicalRole::User,
            text: system_prompt.to_string(),
        });
        turns.extend(history.iter().map(ProviderTurn::from));
        Self { turns }
    }

    pub fn turns(&self) -> &[ProviderTurn] {
        &self.turns
    }
}

/// Sampling parameters sent with every provider call. Fixed constants, not
/// caller-configurable.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HarmBlockThreshold {
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Block at medium severity or above across all four harm categories.
pub fn default_safety_settings() -> Vec<SafetySetting> {
    [
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: HarmBlockThreshold::BlockMediumAndAbove,
    })
    .collect()
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned no reply text")]
    EmptyReply,
}

/// Seam between the relay and the hosted model. One implementation talks to
/// the real provider; tests inject fakes.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Make exactly one provider call: `message` is appended after the
    /// session turns and the generated reply text is returned. No retry.
    async fn send_message(
        &self,
        session: &ChatSession,
        message: &str,
    ) -> Result<String, ProviderError>;
}
