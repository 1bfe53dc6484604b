//! papersync-hook - Notion ⇄ arXiv webhook service
//!
//! Startup order:
//! 1. `.env` and command-line arguments
//! 2. Configuration (CLI > ENV > TOML > defaults)
//! 3. Tracing
//! 4. arXiv and Notion clients
//! 5. HTTP server with graceful shutdown

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use papersync_common::config::TomlConfig;
use papersync_hook::services::{ArxivClient, NotionClient};
use papersync_hook::workflow::PaperSync;
use papersync_hook::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};

/// Command-line arguments for papersync-hook
#[derive(Parser, Debug)]
#[command(name = "papersync-hook")]
#[command(about = "Fills Notion paper pages with arXiv metadata")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "PAPERSYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level or filter directive
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal in production
    let dotenv = dotenvy::dotenv().ok();

    let args = Args::parse();

    let (mut config, config_path) =
        TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    papersync_common::logging::init(&config.logging).context("Failed to initialize logging")?;

    info!(
        "Starting papersync-hook v{}",
        env!("CARGO_PKG_VERSION")
    );
    if let Some(path) = &dotenv {
        info!("Loaded environment from {}", path.display());
    }
    match &config_path {
        Some(path) => info!("Configuration: {}", path.display()),
        None => warn!("No config file found, using defaults and environment"),
    }

    let token = config.notion_token()?;
    let catalog = ArxivClient::from_config(&config.arxiv)
        .context("Failed to create arXiv client")?;
    let store = NotionClient::from_config(&config.notion, &token)
        .context("Failed to create Notion client")?;
    info!("arXiv API: {}", config.arxiv.api_base_url);
    info!("Notion API: {} (version {})", config.notion.api_base_url, config.notion.api_version);

    let state = AppState::new(PaperSync::new(Arc::new(catalog), Arc::new(store)));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Webhook endpoint: http://{}/webhook", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
