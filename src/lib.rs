pub mod cli;
pub mod client;
pub mod config;
pub mod llm;
pub mod models;
pub mod server;

use cli::Args;
use llm::gemini::GeminiChatClient;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Listen Address: {}", args.listen_addr);
    info!("Chat Model: {}", args.chat_model);
    info!("Chat Base URL: {}", args.chat_base_url);
    info!("-------------------------");

    let chat_client = Arc::new(GeminiChatClient::new(
        args.gemini_api_key.clone(),
        args.chat_model.clone(),
        args.chat_base_url.clone(),
    ));
    let server = Server::new(args.listen_addr.clone(), chat_client);
    server.run().await
}
