use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{ IntoResponse, Response },
    routing::post,
    Json,
    Router,
};
use log::{ error, info };
use serde_json::Value;
use thiserror::Error as ThisError;
use tower_http::cors::{ Any, CorsLayer };

use crate::config::prompt::SUPPORT_SYSTEM_PROMPT;
use crate::llm::{ ChatClient, ChatSession, ProviderError };
use crate::models::chat::{ ChatRequest, ChatResponse, ErrorResponse, InvalidInput };

#[derive(Debug, ThisError)]
pub enum RelayError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("{0}")]
    BadBody(#[from] serde_json::Error),
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

#[derive(Clone)]
struct AppState {
    chat_client: Arc<dyn ChatClient>,
    system_prompt: &'static str,
}

pub fn router(chat_client: Arc<dyn ChatClient>, system_prompt: &'static str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .with_state(AppState {
            chat_client,
            system_prompt,
        })
}

pub async fn start_http_server(
    addr: &str,
    chat_client: Arc<dyn ChatClient>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = addr.parse::<SocketAddr>()?;
    info!("Starting HTTP API server on: http://{}", addr);

    let app = router(chat_client, SUPPORT_SYSTEM_PROMPT);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Validation and provider failures both report as 500 with `{error}`; the
/// caller's wire contract does not distinguish them.
async fn chat_handler(State(state): State<AppState>, body: String) -> Response {
    match relay_chat(state.chat_client.as_ref(), state.system_prompt, &body).await {
        Ok(text) => (StatusCode::OK, Json(ChatResponse { text })).into_response(),
        Err(e) => {
            error!("Error in chat relay: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// One relay cycle: shape-check the body, translate roles, seed the session,
/// call the provider exactly once. Holds no state across calls; the session
/// lives only for this invocation.
async fn relay_chat(
    chat_client: &dyn ChatClient,
    system_prompt: &str,
    body: &str,
) -> Result<String, RelayError> {
    let value: Value = serde_json::from_str(body)?;
    let request = ChatRequest::from_value(&value)?;
    let session = ChatSession::new(system_prompt, &request.history);
    let text = chat_client.send_message(&session, &request.message).await?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ CanonicalRole, ProviderTurn };
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records what the relay hands to the provider and returns a canned
    /// result.
    struct FakeChatClient {
        reply: Result<String, ()>,
        seen: Mutex<Vec<(Vec<ProviderTurn>, String)>>,
    }

    impl FakeChatClient {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatClient for FakeChatClient {
        async fn send_message(
            &self,
            session: &ChatSession,
            message: &str,
        ) -> Result<String, ProviderError> {
            self.seen
                .lock()
                .unwrap()
                .push((session.turns().to_vec(), message.to_string()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(ProviderError::EmptyReply),
            }
        }
    }

    #[tokio::test]
    async fn returns_provider_reply_for_valid_request() {
        let client = FakeChatClient::replying("It ships tomorrow.");
        let body = json!({ "message": "Where is my order?", "history": [] }).to_string();
        let text = relay_chat(&client, "seed", &body).await.unwrap();
        assert_eq!(text, "It ships tomorrow.");

        let seen = client.seen.lock().unwrap();
        let (turns, message) = &seen[0];
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].text, "seed");
        assert_eq!(turns[0].role, CanonicalRole::User);
        assert_eq!(message, "Where is my order?");
    }

    #[tokio::test]
    async fn seeds_session_before_translated_history() {
        let client = FakeChatClient::replying("ok");
        let body = json!({
            "message": "And returns?",
            "history": [
                { "text": "Hi", "role": "user" },
                { "text": "Hello! How can I help?", "role": "bot" },
                { "text": "odd", "role": "something-else" }
            ]
        })
        .to_string();
        relay_chat(&client, "persona seed", &body).await.unwrap();

        let seen = client.seen.lock().unwrap();
        let (turns, _) = &seen[0];
        assert_eq!(turns[0].text, "persona seed");
        assert_eq!(turns[1].role, CanonicalRole::User);
        assert_eq!(turns[2].role, CanonicalRole::Model);
        assert_eq!(turns[3].role, CanonicalRole::User);
    }

    #[tokio::test]
    async fn invalid_message_fails_before_provider_call() {
        let client = FakeChatClient::replying("never");
        let body = json!({ "message": 123, "history": [] }).to_string();
        let err = relay_chat(&client, "seed", &body).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid input data");
        assert!(client.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_error() {
        let client = FakeChatClient::failing();
        let body = json!({ "message": "hi", "history": [] }).to_string();
        let err = relay_chat(&client, "seed", &body).await.unwrap_err();
        assert!(matches!(err, RelayError::Provider(_)));
    }

    #[tokio::test]
    async fn unparseable_body_is_rejected() {
        let client = FakeChatClient::replying("never");
        let err = relay_chat(&client, "seed", "not json").await.unwrap_err();
        assert!(matches!(err, RelayError::BadBody(_)));
        assert!(client.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn handler_maps_success_to_200_and_failure_to_500() {
        let ok_state = AppState {
            chat_client: Arc::new(FakeChatClient::replying("hi there")),
            system_prompt: "seed",
        };
        let body = json!({ "message": "hello", "history": [] }).to_string();
        let response = chat_handler(State(ok_state), body).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, json!({ "text": "hi there" }));

        let err_state = AppState {
            chat_client: Arc::new(FakeChatClient::replying("never")),
            system_prompt: "seed",
        };
        let body = json!({ "message": 123, "history": [] }).to_string();
        let response = chat_handler(State(err_state), body).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, json!({ "error": "Invalid input data" }));
    }
}
