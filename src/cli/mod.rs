use clap::Parser;

use crate::llm::gemini::{ DEFAULT_BASE_URL, DEFAULT_MODEL };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address the HTTP API server binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    pub listen_addr: String,

    /// API key for the Gemini provider. Not validated at startup; an empty
    /// key surfaces as a provider failure on the first chat request.
    #[arg(long, env = "GEMINI_API_KEY", default_value = "")]
    pub gemini_api_key: String,

    /// Model name for chat completion
    #[arg(long, env = "CHAT_MODEL", default_value = DEFAULT_MODEL)]
    pub chat_model: String,

    /// Base URL for the Gemini REST API
    #[arg(long, env = "CHAT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub chat_base_url: String,
}
