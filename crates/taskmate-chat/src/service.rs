use std::sync::Arc;

use taskmate_llm::{ChatClient, ChatOptions, ChatRequest, Message};

use crate::error::Result;
use crate::format::{format_reply, DEFAULT_MAX_LENGTH};
use crate::history::ConversationStore;
use crate::productivity::{compose_user_message, productivity_context};
use crate::templates::DEFAULT_SYSTEM_PROMPT;

/// Static settings of the chat relay
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub model: String,
    pub system_prompt: String,
    pub max_segment_length: usize,
    pub options: ChatOptions,
}

impl ChatSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_segment_length: DEFAULT_MAX_LENGTH,
            options: ChatOptions::default(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_max_segment_length(mut self, max_segment_length: usize) -> Self {
        self.max_segment_length = max_segment_length;
        self
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }
}

/// One incoming chat message with the user's task context
#[derive(Debug, Clone, Default)]
pub struct TurnRequest {
    pub user_id: String,
    pub message: String,
    pub active_todos: Vec<String>,
    pub completed_todos: Vec<String>,
}

impl TurnRequest {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_todos(mut self, active: Vec<String>, completed: Vec<String>) -> Self {
        self.active_todos = active;
        self.completed_todos = completed;
        self
    }
}

/// Relays chat turns to the model and formats the replies.
///
/// Holds no per-request state; the conversation store is injected and shared.
pub struct ChatService {
    client: Arc<dyn ChatClient>,
    store: Arc<ConversationStore>,
    settings: ChatSettings,
}

impl ChatService {
    pub fn new(
        client: Arc<dyn ChatClient>,
        store: Arc<ConversationStore>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            client,
            store,
            settings,
        }
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    /// Run one chat turn and return the reply as ordered message segments.
    ///
    /// Turns of the same user are serialized. The stored user turn carries the
    /// same content as the one sent upstream, productivity summary included,
    /// and remains in history when the call fails.
    pub async fn respond(&self, request: TurnRequest) -> Result<Vec<String>> {
        let user = self.store.user(&request.user_id).await;
        let _turn = user.begin_turn().await;

        let context = productivity_context(&request.active_todos, &request.completed_todos);
        let content = compose_user_message(context.as_deref(), &request.message);

        let messages = {
            let mut conversation = user.conversation().await;
            conversation.push(Message::human(content));

            let mut messages = Vec::with_capacity(conversation.len() + 1);
            messages.push(Message::system(self.settings.system_prompt.clone()));
            messages.extend(conversation.turns().cloned());
            messages
        };

        tracing::debug!(
            user_id = %request.user_id,
            history = messages.len() - 1,
            with_context = context.is_some(),
            "Sending chat turn upstream"
        );

        let chat_request = ChatRequest::new(self.settings.model.clone(), messages)
            .with_options(self.settings.options.clone());
        let response = match self.client.chat(chat_request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    user_id = %request.user_id,
                    timeout = e.is_timeout(),
                    "Upstream chat call failed: {}",
                    e
                );
                return Err(e.into());
            }
        };

        let reply = format_reply(&response.content, self.settings.max_segment_length);
        user.conversation().await.push(Message::ai(reply.text));

        tracing::info!(
            user_id = %request.user_id,
            parts = reply.segments.len(),
            "AI response generated"
        );

        Ok(reply.segments)
    }
}
