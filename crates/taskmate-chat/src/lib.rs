pub mod error;
pub mod format;
pub mod history;
pub mod productivity;
pub mod service;
mod templates;

pub use error::ChatError;
pub use format::{format_reply, split_segments, strip_markers, wrap_code, Segments, DEFAULT_MAX_LENGTH};
pub use history::{Conversation, ConversationStore, UserConversation};
pub use service::{ChatService, ChatSettings, TurnRequest};
pub use templates::DEFAULT_SYSTEM_PROMPT;
