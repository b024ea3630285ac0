use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use taskmate_llm::Message;
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// Bounded chat history of a single user.
///
/// Holds at most `max_history` turns; pushing past the bound evicts the
/// oldest turns first.
#[derive(Debug, Clone)]
pub struct Conversation {
    turns: VecDeque<Message>,
    max_history: usize,
}

impl Conversation {
    pub fn new(max_history: usize) -> Self {
        let max_history = max_history.max(1);
        Self {
            turns: VecDeque::with_capacity(max_history),
            max_history,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.turns.push_back(message);
        while self.turns.len() > self.max_history {
            self.turns.pop_front();
        }
    }

    pub fn turns(&self) -> impl Iterator<Item = &Message> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Message> {
        self.turns.iter().cloned().collect()
    }
}

/// Chat state of a single user.
///
/// The turn lock is held for a whole chat turn, upstream call included, so
/// turns of the same user never interleave. The conversation lock only guards
/// reads and writes of the window and is never held across the upstream call.
#[derive(Debug)]
pub struct UserConversation {
    turn: Mutex<()>,
    conversation: Mutex<Conversation>,
}

impl UserConversation {
    fn new(max_history: usize) -> Self {
        Self {
            turn: Mutex::new(()),
            conversation: Mutex::new(Conversation::new(max_history)),
        }
    }

    /// Wait for any in-flight turn of this user; the turn lasts until the guard drops
    pub async fn begin_turn(&self) -> MutexGuard<'_, ()> {
        self.turn.lock().await
    }

    pub async fn conversation(&self) -> MutexGuard<'_, Conversation> {
        self.conversation.lock().await
    }
}

/// In-memory conversation histories keyed by user id.
///
/// Different users never block each other. Nothing is persisted; histories
/// live as long as the store.
#[derive(Debug)]
pub struct ConversationStore {
    max_history: usize,
    users: RwLock<HashMap<String, Arc<UserConversation>>>,
}

impl ConversationStore {
    pub fn new(max_history: usize) -> Self {
        Self {
            max_history: max_history.max(1),
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Get the chat state of `user_id`, creating an empty one if needed
    pub async fn user(&self, user_id: &str) -> Arc<UserConversation> {
        if let Some(user) = self.users.read().await.get(user_id) {
            return Arc::clone(user);
        }

        let mut users = self.users.write().await;
        let user = users
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(UserConversation::new(self.max_history)));
        Arc::clone(user)
    }

    /// Snapshot of a user's history, empty for unknown users.
    ///
    /// Does not wait for a turn in flight; a pending turn shows up with its
    /// user message and without the reply yet.
    pub async fn history(&self, user_id: &str) -> Vec<Message> {
        let user = self.users.read().await.get(user_id).cloned();
        match user {
            Some(user) => user.conversation().await.to_vec(),
            None => Vec::new(),
        }
    }

    #[cfg(test)]
    async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}
