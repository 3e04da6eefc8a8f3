use async_trait::async_trait;
use thiserror::Error;

use crate::models::chat::{ ChatRequest, ChatResponse };

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("relay returned status {0}")]
    Status(u16),
}

/// Carries one chat request to the relay and returns the parsed reply.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

/// Transport over HTTP, posting JSON to the relay's chat route.
pub struct HttpRelayTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpRelayTransport {
    /// `endpoint` is the full URL of the chat route, e.g.
    /// `http://localhost:3000/api/chat`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let resp = self.http.post(&self.endpoint).json(request).send().await?;
        if !resp.status().is_success() {
            return Err(TransportError::Status(resp.status().as_u16()));
        }
        Ok(resp.json::<ChatResponse>().await?)
    }
}
