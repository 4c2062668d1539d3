//! HTTP application assembly for the todo service.
//!
//! Wraps [`todo_api::api_router`] under `/api` and adds the cross-cutting
//! layers (CORS, request tracing). Configuration loading lives here too so
//! the binary stays a thin shell.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use todo_core::TodoStore;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TODO_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  #[serde(default = "default_database_path")]
  pub database_path: PathBuf,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 5000 }

fn default_database_path() -> PathBuf { PathBuf::from("/data/todos.db") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          default_host(),
      port:          default_port(),
      database_path: default_database_path(),
    }
  }
}

impl ServerConfig {
  /// Layer an optional TOML file under `TODO_`-prefixed environment
  /// variables. A missing file is not an error.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("TODO"))
      .build()?
      .try_deserialize()
  }

  /// `host:port`, suitable for [`tokio::net::TcpListener::bind`].
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: the API under `/api`, open to any origin.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: TodoStore + 'static,
{
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods(Any)
    .allow_headers(Any);

  Router::new()
    .nest("/api", todo_api::api_router(store))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}
