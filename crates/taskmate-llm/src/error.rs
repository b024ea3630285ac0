use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("AI API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("AI API request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to send request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl LlmError {
    /// Timeouts and upstream failures are handled the same way by callers,
    /// this only tells them apart for logging.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, LlmError>;
