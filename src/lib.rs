//! Note Assistant
//!
//! A small notes backend with:
//! - CRUD and title/content search over notes stored in SQLite
//! - Four canned AI prompts (summarize, ideas, improve, answer) forwarded to
//!   Anthropic Claude on AWS Bedrock

pub mod api;
pub mod completion;
pub mod notes;
pub mod prompts;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::{Context, Result};
use completion::{BedrockCompletionClient, BedrockConfig, CompletionClient};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use store::{NoteStore, SqliteNoteStore};

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub database: DatabaseYamlConfig,
    pub bedrock: BedrockYamlConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub port: u16,
    /// Front-end origins allowed by CORS
    pub allowed_origins: Vec<String>,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            allowed_origins: vec!["http://localhost:3000".into()],
        }
    }
}

/// Database configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseYamlConfig {
    /// SQLite file, or `:memory:`
    pub path: String,
}

impl Default for DatabaseYamlConfig {
    fn default() -> Self {
        Self {
            path: "notes.db".into(),
        }
    }
}

/// Bedrock configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BedrockYamlConfig {
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub endpoint_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for BedrockYamlConfig {
    fn default() -> Self {
        let defaults = BedrockConfig::default();
        Self {
            region: defaults.region,
            access_key: None,
            secret_key: None,
            model_id: defaults.model_id,
            max_tokens: defaults.max_tokens,
            temperature: None,
            endpoint_url: None,
            request_timeout_secs: None,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub allowed_origins: Vec<String>,
    pub database_path: String,
    pub bedrock: BedrockConfig,
    /// YAML file the config was read from, if any
    pub config_yaml_path: Option<PathBuf>,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

impl Config {
    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. A missing or
    /// unparseable file falls back to env vars / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        // 1. Load YAML config (or defaults if file not found)
        let (yaml, loaded_from) = Self::load_yaml(yaml_path);

        // 2. Build Config with env var overrides
        let bedrock = BedrockConfig {
            region: env_var("BEDROCK_AWS_REGION").unwrap_or(yaml.bedrock.region),
            access_key: env_var("BEDROCK_AWS_ACCESS_KEY").or(yaml.bedrock.access_key),
            secret_key: env_var("BEDROCK_AWS_SECRET_KEY").or(yaml.bedrock.secret_key),
            model_id: env_var("BEDROCK_MODEL_ID").unwrap_or(yaml.bedrock.model_id),
            max_tokens: env_var("BEDROCK_MAX_TOKENS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(yaml.bedrock.max_tokens),
            temperature: yaml.bedrock.temperature,
            endpoint_url: env_var("BEDROCK_ENDPOINT_URL").or(yaml.bedrock.endpoint_url),
            request_timeout_secs: yaml.bedrock.request_timeout_secs,
        };

        Ok(Self {
            server_port: env_var("SERVER_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(yaml.server.port),
            allowed_origins: env_var("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or(yaml.server.allowed_origins),
            database_path: env_var("DATABASE_PATH").unwrap_or(yaml.database.path),
            bedrock,
            config_yaml_path: loaded_from,
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> (YamlConfig, Option<PathBuf>) {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    (config, Some(path.to_path_buf()))
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    (YamlConfig::default(), None)
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                (YamlConfig::default(), None)
            }
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
    pub completion: Arc<dyn CompletionClient>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state with all services initialized
    pub async fn new(config: Config) -> Result<Self> {
        let store = Arc::new(
            SqliteNoteStore::open(&config.database_path)
                .with_context(|| format!("Failed to open database {}", config.database_path))?,
        );
        let completion = Arc::new(BedrockCompletionClient::new(config.bedrock.clone()).await?);

        Ok(Self {
            store,
            completion,
            config: Arc::new(config),
        })
    }
}

/// Start the HTTP server and run until Ctrl-C.
pub async fn start_server(config: Config) -> Result<()> {
    let port = config.server_port;
    let state = AppState::new(config).await?;
    let server_state = Arc::new(api::ServerState::new(state));
    let app = api::create_router(server_state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Note assistant listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

// ============================================================================
// Tests
// ============================================================================
