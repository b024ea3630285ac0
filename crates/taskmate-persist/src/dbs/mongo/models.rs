use bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{Todo, TodoId};

/// Todo document in the `todos` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoTodo {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: Option<BsonDateTime>,
    pub completed_at: Option<BsonDateTime>,
}

/// Id sequence document in the `counters` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    pub seq: TodoId,
}

impl From<MongoTodo> for Todo {
    fn from(todo: MongoTodo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            time: todo.time,
            completed: todo.completed,
            created_at: todo.created_at.map(BsonDateTime::to_chrono),
            completed_at: todo.completed_at.map(BsonDateTime::to_chrono),
        }
    }
}
