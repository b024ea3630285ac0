pub mod error;
pub mod openai;
pub mod traits;
pub mod types;

pub use error::LlmError;
pub use openai::{OpenAIClient, DEFAULT_CHAT_URL, DEFAULT_TIMEOUT};
pub use traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
pub use types::Message;
