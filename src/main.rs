//! Note Assistant - Main Server
//!
//! Notes CRUD plus canned AI prompts backed by AWS Bedrock.

use anyhow::Result;
use clap::{Parser, Subcommand};
use note_assistant::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "note-assistant")]
#[command(about = "Notes backend with AI writing helpers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides config.yaml / SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the YAML config file (default: ./config.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// SQLite database file, or `:memory:` (overrides config.yaml / DATABASE_PATH)
        #[arg(long)]
        database: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,note_assistant=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            config,
            database,
        } => {
            let mut config = Config::from_yaml_and_env(config.as_deref())?;
            if let Some(port) = port {
                config.server_port = port;
            }
            if let Some(path) = database {
                config.database_path = path;
            }
            note_assistant::start_server(config).await
        }
    }
}
