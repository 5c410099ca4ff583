//! tdas - Trading Data Assistant
//!
//! A conversational front-end over two CSV datasets (trade records and
//! portfolio holdings): a fixed aggregation report is computed over the
//! loaded tables, embedded into the system prompt of an OpenAI-compatible
//! chat endpoint together with a bounded conversation window, and the
//! model's answer is relayed back.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use tdas::context::Session;
//! use tdas::chat::{ChatOrchestrator, OpenAiClient};
//! use tdas::models::TdasConfig;
//! ```

pub use tdas_chat as chat;
pub use tdas_context as context;
pub use tdas_loader as loader;
pub use tdas_models as models;

use std::sync::Arc;

use tdas_chat::{ChatError, ChatOrchestrator, OpenAiClient};
use tdas_models::TdasConfig;

/// Read the API key named by the configuration from the environment.
///
/// A missing key is a fatal startup condition: the shell checks this
/// before serving any interaction.
pub fn load_api_key(config: &TdasConfig) -> Result<String, ChatError> {
    std::env::var(&config.chat.api_key_env)
        .map_err(|_| ChatError::MissingApiKey(config.chat.api_key_env.clone()))
}

/// Build a chat orchestrator backed by the configured HTTP endpoint.
pub fn build_orchestrator(config: &TdasConfig, api_key: String) -> ChatOrchestrator {
    let client = OpenAiClient::new(config.chat.base_url.clone(), api_key);
    ChatOrchestrator::new(Arc::new(client), config.chat.clone())
}
