use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TodoId = i64;

/// Database-agnostic todo record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub time: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "completedAt")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Payload for creating or replacing a todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time: String::new(),
            completed: false,
        }
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Completion timestamp a todo gets when this payload is applied
    pub fn completed_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.completed.then_some(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_todo_defaults() {
        let todo: NewTodo = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        assert_eq!(todo, NewTodo::new("Buy milk"));
    }

    #[test]
    fn test_todo_uses_camel_case_timestamps() {
        let todo = Todo {
            id: 1,
            title: "Buy milk".to_string(),
            time: "10:00".to_string(),
            completed: false,
            created_at: None,
            completed_at: None,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("completedAt").is_some());
    }
}
