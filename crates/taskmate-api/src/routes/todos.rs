use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use taskmate_persist::{NewTodo, Todo, TodoId};
use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TodoRequest {
    pub title: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub time: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "completedAt")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// List all todos
#[utoipa::path(
    get,
    path = "/todos",
    responses(
        (status = 200, description = "All todos", body = [TodoResponse])
    ),
    tag = "todos"
)]
pub async fn list_todos(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TodoResponse>>> {
    let todos = state.todos.list_todos().await?;
    Ok(Json(todos.into_iter().map(todo_to_response).collect()))
}

/// Get a single todo
#[utoipa::path(
    get,
    path = "/todos/{todo_id}",
    params(
        ("todo_id" = i64, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo details", body = TodoResponse),
        (status = 404, description = "Todo not found")
    ),
    tag = "todos"
)]
pub async fn get_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<TodoId>,
) -> ApiResult<Json<TodoResponse>> {
    let todo = state
        .todos
        .get_todo(todo_id)
        .await?
        .ok_or(ApiError::TodoNotFound(todo_id))?;

    Ok(Json(todo_to_response(todo)))
}

/// Create a todo
#[utoipa::path(
    post,
    path = "/todos",
    request_body = TodoRequest,
    responses(
        (status = 200, description = "Todo created", body = TodoResponse)
    ),
    tag = "todos"
)]
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TodoRequest>,
) -> ApiResult<Json<TodoResponse>> {
    let todo = state.todos.create_todo(req.into()).await?;
    Ok(Json(todo_to_response(todo)))
}

/// Replace a todo's title, time and completion state
#[utoipa::path(
    put,
    path = "/todos/{todo_id}",
    params(
        ("todo_id" = i64, Path, description = "Todo ID")
    ),
    request_body = TodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = TodoResponse),
        (status = 404, description = "Todo not found")
    ),
    tag = "todos"
)]
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<TodoId>,
    Json(req): Json<TodoRequest>,
) -> ApiResult<Json<TodoResponse>> {
    let todo = state
        .todos
        .update_todo(todo_id, req.into())
        .await?
        .ok_or(ApiError::TodoNotFound(todo_id))?;

    Ok(Json(todo_to_response(todo)))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    params(
        ("todo_id" = i64, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo deleted", body = DeleteResponse),
        (status = 404, description = "Todo not found")
    ),
    tag = "todos"
)]
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(todo_id): Path<TodoId>,
) -> ApiResult<Json<DeleteResponse>> {
    if !state.todos.delete_todo(todo_id).await? {
        return Err(ApiError::TodoNotFound(todo_id));
    }

    Ok(Json(DeleteResponse {
        message: "Todo deleted".to_string(),
    }))
}

impl From<TodoRequest> for NewTodo {
    fn from(req: TodoRequest) -> Self {
        NewTodo::new(req.title).time(req.time).completed(req.completed)
    }
}

fn todo_to_response(todo: Todo) -> TodoResponse {
    TodoResponse {
        id: todo.id,
        title: todo.title,
        time: todo.time,
        completed: todo.completed,
        created_at: todo.created_at,
        completed_at: todo.completed_at,
    }
}
