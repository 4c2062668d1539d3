//! JSON REST API for the todo service.
//!
//! Exposes an axum [`Router`] backed by any [`todo_core::TodoStore`].
//! CORS, tracing, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", todo_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod health;
pub mod todos;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use todo_core::TodoStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TodoStore + 'static,
{
  Router::new()
    .route("/health", get(health::handler))
    .route("/todos", get(todos::list::<S>).post(todos::create::<S>))
    .route(
      "/todos/{id}",
      put(todos::update_one::<S>).delete(todos::delete_one::<S>),
    )
    .with_state(store)
}
