use taskmate_llm::LlmError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Failed to get AI response: {0}")]
    Upstream(#[from] LlmError),
}

pub type Result<T> = std::result::Result<T, ChatError>;
