use async_trait::async_trait;
use log::info;
use serde::{ Deserialize, Serialize };

use super::{
    default_safety_settings,
    CanonicalRole,
    ChatClient,
    ChatSession,
    GenerationConfig,
    ProviderError,
    SafetySetting,
};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: &'a GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: CanonicalRole,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiReplyContent,
}

#[derive(Deserialize)]
struct GeminiReplyContent {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Deserialize)]
struct GeminiReplyPart {
    text: String,
}

/// Chat client for the Gemini `generateContent` REST API. Constructed once
/// at process start and shared behind `Arc<dyn ChatClient>`.
pub struct GeminiChatClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    generation: GenerationConfig,
    safety: Vec<SafetySetting>,
}

impl GeminiChatClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url,
            generation: GenerationConfig::default(),
            safety: default_safety_settings(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }

    fn build_payload<'a>(&'a self, session: &'a ChatSession, message: &'a str) -> GeminiRequest<'a> {
        let mut contents: Vec<GeminiContent> = session
            .turns()
            .iter()
            .map(|turn| GeminiContent {
                role: turn.role,
                parts: vec![GeminiPart { text: &turn.text }],
            })
            .collect();
        contents.push(GeminiContent {
            role: CanonicalRole::User,
            parts: vec![GeminiPart { text: message }],
        });
        GeminiRequest {
            contents,
            generation_config: &self.generation,
            safety_settings: &self.safety,
        }
    }
}

#[async_trait]
impl ChatClient for GeminiChatClient {
    async fn send_message(
        &self,
        session: &ChatSession,
        message: &str,
    ) -> Result<String, ProviderError> {
        info!(
            "GeminiChatClient::send_message() → model={} turns={}",
            self.model,
            session.turns().len() + 1
        );
        let payload = self.build_payload(session, message);
        let resp = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        let body: GeminiResponse = resp.json().await?;
        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(ProviderError::EmptyReply)
    }
}
