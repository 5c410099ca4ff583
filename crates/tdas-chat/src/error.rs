use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Chat API returned no choices")]
    EmptyResponse,

    #[error("Missing API key: environment variable {0} is not set")]
    MissingApiKey(String),
}
