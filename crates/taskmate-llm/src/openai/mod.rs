mod client;

pub use client::{OpenAIClient, DEFAULT_CHAT_URL, DEFAULT_TIMEOUT};
