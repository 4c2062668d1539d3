//! The `TodoStore` trait.
//!
//! Implemented by storage backends (e.g. `todo-store-sqlite`). The API crate
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::todo::{Todo, TodoFields, TodoPatch};

/// Abstraction over a todo storage backend.
///
/// Every method is a single round trip to the backing store. All methods
/// return `Send` futures so the trait can be used behind a multi-threaded
/// axum router.
pub trait TodoStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All todos, newest `created_at` first.
  fn list_todos(
    &self,
  ) -> impl Future<Output = Result<Vec<Todo>, Self::Error>> + Send + '_;

  /// Retrieve a todo by id. Returns `None` if not found.
  ///
  /// The HTTP handlers never need a bare read (update and delete resolve
  /// existence themselves); this is for direct store callers and tests.
  fn get_todo(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Todo>, Self::Error>> + Send + '_;

  /// Insert a todo and return the stored row, including the store-assigned
  /// `id` and `created_at`.
  fn create_todo(
    &self,
    fields: TodoFields,
  ) -> impl Future<Output = Result<Todo, Self::Error>> + Send + '_;

  /// Apply `patch` to the todo with `id` and return the updated row.
  /// Returns `None` if no such todo exists.
  fn update_todo(
    &self,
    id: i64,
    patch: TodoPatch,
  ) -> impl Future<Output = Result<Option<Todo>, Self::Error>> + Send + '_;

  /// Permanently remove a todo. Returns `false` if it did not exist.
  fn delete_todo(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
