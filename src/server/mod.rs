pub mod api;

use crate::llm::ChatClient;
use std::error::Error;
use std::sync::Arc;

/// Owns the listen address and the injected provider client; the process
/// entry point constructs one of these and runs it for the process lifetime.
pub struct Server {
    addr: String,
    chat_client: Arc<dyn ChatClient>,
}

impl Server {
    pub fn new(addr: String, chat_client: Arc<dyn ChatClient>) -> Self {
        Self { addr, chat_client }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(&self.addr, self.chat_client.clone()).await
    }
}
