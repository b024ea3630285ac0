use std::sync::Arc;

use taskmate_chat::ChatService;
use taskmate_persist::TodoStore;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// All resources are wrapped in Arc for sharing across async tasks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub todos: Arc<dyn TodoStore>,
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(config: Config, todos: Arc<dyn TodoStore>, chat: ChatService) -> Self {
        Self {
            config: Arc::new(config),
            todos,
            chat: Arc::new(chat),
        }
    }
}
