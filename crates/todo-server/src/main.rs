//! todo-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `TODO_*`
//! environment variables, opens the SQLite store (creating and migrating it
//! if needed), and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use todo_server::{ServerConfig, expand_tilde};
use todo_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Todo list JSON API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let database_path = expand_tilde(&server_cfg.database_path);

  // Schema init runs inside `open`, so it is done before we accept traffic.
  let store = SqliteStore::open(&database_path)
    .await
    .with_context(|| format!("failed to open store at {database_path:?}"))?;
  tracing::info!(path = ?database_path, "database ready");

  let app = todo_server::app(Arc::new(store));
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("shut down");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
}
