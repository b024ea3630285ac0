use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use taskmate_api::{app::build_router, config::Config, state::AppState};
use taskmate_chat::{ChatService, ChatSettings, ConversationStore};
use taskmate_llm::{ChatClient, ChatRequest, ChatResponse, LlmError};
use taskmate_persist::InMemoryTodoStore;

const CONFIG: &str = r#"
    [server]
    host = "127.0.0.1"
    port = 0

    [cors]
    enabled = false
    origins = []

    [chat]
    api_url = "http://localhost:9/v1/chat/completions"
    model = "test-model"
    max_history = 4
    fallback_message = "Assistant unavailable"

    [storage]
    backend = "memory"

    [logging]
    level = "debug"
    format = "pretty"
"#;

/// Returns canned completions in order, then fails like an unreachable upstream
struct CannedClient {
    replies: Mutex<Vec<String>>,
}

#[async_trait]
impl ChatClient for CannedClient {
    async fn chat(&self, _request: ChatRequest) -> taskmate_llm::error::Result<ChatResponse> {
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(LlmError::Api {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        Ok(ChatResponse {
            content: replies.remove(0),
            usage: None,
            finish_reason: None,
        })
    }
}

fn app(replies: &[&str]) -> Router {
    let config: Config = toml::from_str(CONFIG).unwrap();
    let client = Arc::new(CannedClient {
        replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
    });
    let chat = ChatService::new(
        client,
        Arc::new(ConversationStore::new(config.chat.max_history)),
        ChatSettings::new(config.chat.model.clone()),
    );
    let state = AppState::new(config, Arc::new(InMemoryTodoStore::new()), chat);
    build_router(Arc::new(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_root_and_health() {
    let app = app(&[]);

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Todo List API!");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_todo_crud_flow() {
    let app = app(&[]);

    let (status, created) = send(
        &app,
        "POST",
        "/todos",
        Some(json!({"title": "Buy milk", "time": "09:00"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 1);
    assert_eq!(created["completed"], false);
    assert!(created["completedAt"].is_null());
    assert!(created["createdAt"].is_string());

    let (status, listed) = send(&app, "GET", "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        "PUT",
        "/todos/1",
        Some(json!({"title": "Buy oat milk", "completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Buy oat milk");
    assert_eq!(updated["time"], "");
    assert!(updated["completedAt"].is_string());

    let (status, fetched) = send(&app, "GET", "/todos/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["completed"], true);

    let (status, deleted) = send(&app, "DELETE", "/todos/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Todo deleted");

    let (status, body) = send(&app, "GET", "/todos/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Todo not found: 1");
}

#[tokio::test]
async fn test_unknown_todo_update_and_delete_are_404() {
    let app = app(&[]);

    let (status, _) = send(&app, "PUT", "/todos/99", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/todos/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_send_message_returns_parts_and_records_history() {
    let app = app(&["</think>Sure!\n\n```python\nprint('hi')\n```"]);

    let (status, body) = send(
        &app,
        "POST",
        "/ai/send_message",
        Some(json!({
            "user_id": "u1",
            "message": "Show me hello world",
            "active_todos": ["Learn Python"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["parts"],
        json!(["Sure!\n\n", "```python\nprint('hi')\n```"])
    );

    let (status, history) = send(&app, "GET", "/ai/response_history/u1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        history,
        json!([
            {
                "role": "user",
                "content": "Current productivity: 0%\nActive tasks: Learn Python\nCompleted tasks: \nShow me hello world"
            },
            {"role": "assistant", "content": "Sure!\n\n```python\nprint('hi')\n```"}
        ])
    );
}

#[tokio::test]
async fn test_send_message_falls_back_on_upstream_failure() {
    let app = app(&[]);

    let (status, body) = send(
        &app,
        "POST",
        "/ai/send_message",
        Some(json!({"user_id": "u1", "message": "hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["parts"], json!(["Assistant unavailable"]));
}

#[tokio::test]
async fn test_history_of_unknown_user_is_empty() {
    let app = app(&[]);
    let (status, body) = send(&app, "GET", "/ai/response_history/ghost", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = app(&[]);
    let (status, body) = send(&app, "GET", "/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/todos/{todo_id}"].is_object());
    assert!(body["paths"]["/ai/send_message"].is_object());
}
