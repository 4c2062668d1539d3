//! Handlers for `/todos` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/todos`      | Newest first; no filtering or paging |
//! | `POST`   | `/todos`      | Body: [`CreateTodoBody`]; returns 201 + stored todo |
//! | `PUT`    | `/todos/{id}` | Body: [`UpdateTodoBody`]; 404 if not found |
//! | `DELETE` | `/todos/{id}` | 404 if not found |
//!
//! Bodies are taken as raw bytes and parsed here rather than through axum's
//! `Json` extractor, so that malformed input maps onto the statuses above
//! instead of axum's own rejections.

use std::sync::Arc;

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State, rejection::PathRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};
use todo_core::{Todo, TodoFields, TodoPatch, TodoStore};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /todos`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Todo>>, ApiError>
where
  S: TodoStore,
{
  let todos = store.list_todos().await.map_err(ApiError::store)?;
  Ok(Json(todos))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /todos`.
#[derive(Debug, Deserialize)]
pub struct CreateTodoBody {
  pub title:     String,
  /// Defaults to `false`; an explicit `null` is treated the same as absent.
  pub completed: Option<bool>,
  pub due_date:  Option<String>,
}

impl From<CreateTodoBody> for TodoFields {
  fn from(b: CreateTodoBody) -> Self {
    TodoFields {
      title:     b.title,
      completed: b.completed.unwrap_or(false),
      due_date:  b.due_date,
    }
  }
}

/// `POST /todos` returns 201 + the stored [`Todo`].
///
/// A missing, unparsable, or title-less body is a 400 `Title is required`;
/// a body with a `title` key but a mistyped field is a 400 naming the field.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: TodoStore,
{
  let title_required = || ApiError::BadRequest("Title is required".to_owned());

  let value: Value = serde_json::from_slice(&body).map_err(|_| title_required())?;
  if !value.as_object().is_some_and(|o| o.contains_key("title")) {
    return Err(title_required());
  }
  let body: CreateTodoBody = serde_json::from_value(value)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let todo = store
    .create_todo(TodoFields::from(body))
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(todo)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /todos/{id}`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoBody {
  pub title:     Option<String>,
  pub completed: Option<bool>,
  /// Absent keeps the stored date; `null` clears it.
  #[serde(default, deserialize_with = "present")]
  pub due_date:  Option<Option<String>>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

impl From<UpdateTodoBody> for TodoPatch {
  fn from(b: UpdateTodoBody) -> Self {
    TodoPatch {
      title:     b.title,
      completed: b.completed,
      due_date:  b.due_date,
    }
  }
}

/// A non-integer id can never match a row, so it is reported as not found.
fn todo_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
  path
    .map(|Path(id)| id)
    .map_err(|_| ApiError::todo_not_found())
}

/// `PUT /todos/{id}` returns the full updated [`Todo`].
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
  body: Bytes,
) -> Result<Json<Todo>, ApiError>
where
  S: TodoStore,
{
  let id = todo_id(path)?;
  let body: UpdateTodoBody = serde_json::from_slice(&body)
    .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

  let todo = store
    .update_todo(id, TodoPatch::from(body))
    .await
    .map_err(ApiError::store)?
    .ok_or_else(ApiError::todo_not_found)?;
  Ok(Json(todo))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /todos/{id}` (hard delete)
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TodoStore,
{
  let id = todo_id(path)?;
  let removed = store.delete_todo(id).await.map_err(ApiError::store)?;
  if !removed {
    return Err(ApiError::todo_not_found());
  }
  Ok(Json(json!({ "message": "Todo deleted successfully" })))
}
