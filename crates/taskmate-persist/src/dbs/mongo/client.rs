use async_trait::async_trait;
use bson::DateTime as BsonDateTime;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};

use super::models::{Counter, MongoTodo};
use crate::error::{PersistError, Result};
use crate::models::{NewTodo, Todo, TodoId};
use crate::trait_client::TodoStore;

const TODO_SEQUENCE: &str = "todos";

/// MongoDB-backed todo store with sequential integer ids
pub struct MongoTodoStore {
    todos: Collection<MongoTodo>,
    counters: Collection<Counter>,
}

impl MongoTodoStore {
    /// Connect to MongoDB and create client
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self::new(&client, database))
    }

    pub fn new(client: &Client, database: &str) -> Self {
        let db = client.database(database);
        Self {
            todos: db.collection("todos"),
            counters: db.collection("counters"),
        }
    }

    async fn next_id(&self) -> Result<TodoId> {
        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": TODO_SEQUENCE },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| PersistError::Internal("todo id counter missing after upsert".to_string()))?;

        Ok(counter.seq)
    }
}

#[async_trait]
impl TodoStore for MongoTodoStore {
    async fn list_todos(&self) -> Result<Vec<Todo>> {
        let todos: Vec<MongoTodo> = self
            .todos
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(todos.into_iter().map(Todo::from).collect())
    }

    async fn get_todo(&self, id: TodoId) -> Result<Option<Todo>> {
        let todo = self.todos.find_one(doc! { "_id": id }).await?;
        Ok(todo.map(Todo::from))
    }

    async fn create_todo(&self, todo: NewTodo) -> Result<Todo> {
        let todo = MongoTodo {
            id: self.next_id().await?,
            title: todo.title,
            time: todo.time,
            completed: todo.completed,
            created_at: Some(BsonDateTime::now()),
            completed_at: None,
        };

        self.todos.insert_one(&todo).await?;
        tracing::debug!(todo_id = todo.id, "Todo created");
        Ok(todo.into())
    }

    async fn update_todo(&self, id: TodoId, todo: NewTodo) -> Result<Option<Todo>> {
        let completed_at = todo.completed_at(chrono::Utc::now()).map(BsonDateTime::from_chrono);
        let update = doc! {
            "$set": {
                "title": todo.title,
                "time": todo.time,
                "completed": todo.completed,
                "completed_at": completed_at,
            }
        };

        let updated = self
            .todos
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated.map(Todo::from))
    }

    async fn delete_todo(&self, id: TodoId) -> Result<bool> {
        let result = self.todos.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
