use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{NewTodo, Todo, TodoId};
use crate::trait_client::TodoStore;

#[derive(Debug, Default)]
struct Inner {
    todos: BTreeMap<TodoId, Todo>,
    last_id: TodoId,
}

/// Process-local todo store, used for development and tests
#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    inner: RwLock<Inner>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn list_todos(&self) -> Result<Vec<Todo>> {
        Ok(self.inner.read().await.todos.values().cloned().collect())
    }

    async fn get_todo(&self, id: TodoId) -> Result<Option<Todo>> {
        Ok(self.inner.read().await.todos.get(&id).cloned())
    }

    async fn create_todo(&self, todo: NewTodo) -> Result<Todo> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let todo = Todo {
            id: inner.last_id,
            title: todo.title,
            time: todo.time,
            completed: todo.completed,
            created_at: Some(Utc::now()),
            completed_at: None,
        };
        inner.todos.insert(todo.id, todo.clone());

        tracing::debug!(todo_id = todo.id, "Todo created");
        Ok(todo)
    }

    async fn update_todo(&self, id: TodoId, todo: NewTodo) -> Result<Option<Todo>> {
        let mut inner = self.inner.write().await;
        let Some(existing) = inner.todos.get_mut(&id) else {
            return Ok(None);
        };

        existing.completed_at = todo.completed_at(Utc::now());
        existing.title = todo.title;
        existing.time = todo.time;
        existing.completed = todo.completed;

        Ok(Some(existing.clone()))
    }

    async fn delete_todo(&self, id: TodoId) -> Result<bool> {
        Ok(self.inner.write().await.todos.remove(&id).is_some())
    }
}
