pub mod theme;
pub mod transport;

use chrono::{ DateTime, Utc };
use log::warn;

use crate::models::chat::{ ChatRequest, HistoryEntry };
use self::theme::ThemeStore;
use self::transport::{ RelayTransport, TransportError };

/// Fixed user-facing string shown when a submission fails for any reason.
pub const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// Outgoing wire mapping: bot turns go out as "model", everything else
    /// as "user".
    pub fn wire_value(self) -> &'static str {
        match self {
            Role::Bot => "model",
            Role::User => "user",
        }
    }
}

/// One visible conversation entry. Never mutated after creation; discarded
/// with the session.
#[derive(Clone, Debug)]
pub struct Message {
    pub text: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

/// Owns the visible conversation and drives the request/response cycle.
///
/// State changes are synchronous; the async transport call sits between
/// `begin_submit` and the matching `apply_*`, so the surrounding event loop
/// stays responsive while a reply is pending. Each submission fires
/// independently: no retry, no deduplication, no cancellation, and no
/// ordering guarantee between overlapping submissions.
#[derive(Default)]
pub struct ChatController {
    messages: Vec<Message>,
    input: String,
    online: Option<bool>,
    last_error: Option<String>,
    dark_mode: bool,
}

impl ChatController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the persisted theme preference once, at mount time.
    pub fn with_theme(store: &ThemeStore) -> Self {
        Self {
            dark_mode: store.load(),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// `None` until the first submission completes or fails.
    pub fn online(&self) -> Option<bool> {
        self.online
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn toggle_theme(&mut self, store: &ThemeStore) {
        self.dark_mode = !self.dark_mode;
        if let Err(e) = store.save(self.dark_mode) {
            warn!("Failed to persist theme preference: {}", e);
        }
    }

    fn wire_history(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .map(|msg| HistoryEntry {
                text: msg.text.clone(),
                role: msg.role.wire_value().to_string(),
            })
            .collect()
    }

    /// Record the outgoing user message and build the request to send. The
    /// history snapshot is taken before the append, so the new message
    /// reaches the relay exactly once, as the `message` field.
    pub fn begin_submit(&mut self, text: impl Into<String>) -> ChatRequest {
        let text = text.into();
        let history = self.wire_history();
        self.messages.push(Message {
            text: text.clone(),
            role: Role::User,
            timestamp: Utc::now(),
        });
        self.input.clear();
        ChatRequest {
            message: text,
            history,
        }
    }

    /// Append the reply. With overlapping submissions the bot message lands
    /// wherever the conversation is when the response arrives; replies apply
    /// in completion order.
    pub fn apply_success(&mut self, text: impl Into<String>) {
        self.messages.push(Message {
            text: text.into(),
            role: Role::Bot,
            timestamp: Utc::now(),
        });
        self.online = Some(true);
        self.last_error = None;
    }

    /// The failed user message stays in the conversation; the user should
    /// still see what they sent even though no reply arrived.
    pub fn apply_failure(&mut self) {
        self.online = Some(false);
        self.last_error = Some(SEND_FAILED_MESSAGE.to_string());
    }

    /// One full submit cycle over `transport`.
    pub async fn submit(
        &mut self,
        transport: &dyn RelayTransport,
        text: impl Into<String> + Send,
    ) -> Result<(), TransportError> {
        let request = self.begin_submit(text);
        match transport.send(&request).await {
            Ok(response) => {
                self.apply_success(response.text);
                Ok(())
            }
            Err(e) => {
                self.apply_failure();
                Err(e)
            }
        }
    }
}
