use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewTodo, Todo, TodoId};

/// Trait for todo persistence operations
///
/// Implementations provide backend-specific CRUD operations
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos in id order
    async fn list_todos(&self) -> Result<Vec<Todo>>;

    async fn get_todo(&self, id: TodoId) -> Result<Option<Todo>>;

    /// Store a new todo under the next free id
    async fn create_todo(&self, todo: NewTodo) -> Result<Todo>;

    /// Replace title, time and completion state; `None` if the id is unknown
    async fn update_todo(&self, id: TodoId, todo: NewTodo) -> Result<Option<Todo>>;

    /// Returns false if the id is unknown
    async fn delete_todo(&self, id: TodoId) -> Result<bool>;
}
