use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub chat: ChatConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub api_auth_token: String,
    #[serde(default)]
    pub mongodb_uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Full chat completions endpoint
    pub api_url: String,
    pub model: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Turns kept per user, user and assistant turns both count
    pub max_history: usize,
    #[serde(default = "default_max_segment_length")]
    pub max_segment_length: usize,
    #[serde(default = "default_chat_timeout_secs")]
    pub timeout_secs: u64,
    /// Sent to the user instead of segments when the upstream call fails
    pub fallback_message: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl ChatConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn options(&self) -> taskmate_llm::ChatOptions {
        taskmate_llm::ChatOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Mongodb,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    #[serde(default = "default_database")]
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_system_prompt() -> String {
    taskmate_chat::DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_max_segment_length() -> usize {
    taskmate_chat::DEFAULT_MAX_LENGTH
}

fn default_chat_timeout_secs() -> u64 {
    taskmate_llm::DEFAULT_TIMEOUT.as_secs()
}

fn default_database() -> String {
    "taskmate".to_string()
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables, `TASKMATE_<SECTION>__<KEY>`
    ///    (e.g. `TASKMATE_CHAT__MAX_HISTORY=20`)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("TASKMATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg: Config = config.try_deserialize()?;

        // Load secrets from ENV (not in TOML)
        cfg.api_auth_token = std::env::var("API_AUTH_TOKEN").map_err(|_| {
            ConfigError::Message("API_AUTH_TOKEN environment variable is required".to_string())
        })?;
        if cfg.storage.backend == StorageBackend::Mongodb {
            cfg.mongodb_uri = std::env::var("MONGODB_URI").map_err(|_| {
                ConfigError::Message(
                    "MONGODB_URI environment variable is required for the mongodb backend"
                        .to_string(),
                )
            })?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chat.max_history == 0 {
            return Err(ConfigError::Message(
                "chat.max_history must be at least 1".to_string(),
            ));
        }
        if self.chat.max_segment_length == 0 {
            return Err(ConfigError::Message(
                "chat.max_segment_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
