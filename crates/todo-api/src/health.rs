//! Handler for `GET /health`. Never touches the store.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Name reported in the `service` field of the health response.
pub const SERVICE_NAME: &str = "todo-backend";

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:    &'static str,
  pub timestamp: String,
  pub service:   &'static str,
}

/// `GET /health`
pub async fn handler() -> Json<Health> {
  Json(Health {
    status:    "healthy",
    timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
    service:   SERVICE_NAME,
  })
}
