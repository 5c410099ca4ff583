use serde::{Deserialize, Serialize};

/// Top-level configuration for the assistant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TdasConfig {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub data: DataConfig,
}

/// Configuration for the chat-completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatConfig {
    /// Base URL of an OpenAI-compatible API server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Cap on generated output length.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature. Kept low for reproducible answers.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// How many trailing transcript entries are forwarded per request.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            history_window: default_history_window(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Datasets to load automatically at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    pub trades_path: Option<String>,
    pub holdings_path: Option<String>,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_model() -> String {
    "gpt-4o".to_string()
}
fn default_max_tokens() -> u32 {
    1500
}
fn default_temperature() -> f32 {
    0.3
}
fn default_history_window() -> usize {
    20
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
