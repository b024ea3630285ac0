use axum::Json;
use utoipa::OpenApi;

use crate::routes::{ai, health, todos};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health_check,
        todos::list_todos,
        todos::get_todo,
        todos::create_todo,
        todos::update_todo,
        todos::delete_todo,
        ai::send_message,
        ai::response_history,
    ),
    components(schemas(
        health::WelcomeResponse,
        health::HealthResponse,
        todos::TodoRequest,
        todos::TodoResponse,
        todos::DeleteResponse,
        ai::MessageRequest,
        ai::MessageResponse,
        ai::HistoryEntry,
    )),
    tags(
        (name = "health", description = "Service status"),
        (name = "todos", description = "Todo CRUD"),
        (name = "ai", description = "Productivity assistant chat")
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
