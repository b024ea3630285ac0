use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskmate_api::{
    app::build_router,
    config::{Config, StorageBackend},
    state::AppState,
};
use taskmate_chat::{ChatService, ChatSettings, ConversationStore};
use taskmate_llm::OpenAIClient;
use taskmate_persist::{InMemoryTodoStore, MongoTodoStore, TodoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting Taskmate API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    tracing::info!(url = %config.chat.api_url, model = %config.chat.model, "Initializing chat client");
    let llm_client = OpenAIClient::with_endpoint(
        config.api_auth_token.clone(),
        config.chat.api_url.clone(),
        config.chat.timeout(),
    )?;

    let settings = ChatSettings::new(config.chat.model.clone())
        .with_system_prompt(config.chat.system_prompt.clone())
        .with_max_segment_length(config.chat.max_segment_length)
        .with_options(config.chat.options());
    let store = Arc::new(ConversationStore::new(config.chat.max_history));
    let chat = ChatService::new(Arc::new(llm_client), store, settings);

    let todos: Arc<dyn TodoStore> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory todo storage, data is lost on restart");
            Arc::new(InMemoryTodoStore::new())
        }
        StorageBackend::Mongodb => {
            tracing::info!("Connecting to MongoDB");
            let store =
                MongoTodoStore::connect(&config.mongodb_uri, &config.storage.database).await?;
            tracing::info!("MongoDB connected");
            Arc::new(store)
        }
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, todos, chat));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API docs: http://{}/api/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
