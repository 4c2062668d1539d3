//! [`SqliteStore`]: the SQLite implementation of [`TodoStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use todo_core::{Todo, TodoFields, TodoPatch, TodoStore};

use crate::{
  Result,
  encode::{RawTodo, TODO_COLUMNS},
  schema,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A todo store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection handle is reference-counted and
/// every call is serialised onto the connection's own thread.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run the schema migration.
  ///
  /// The parent directory is created if it does not exist yet.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }

    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        schema::migrate(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn select_by_id(
  conn: &rusqlite::Connection,
  id:   i64,
) -> rusqlite::Result<Option<RawTodo>> {
  conn
    .query_row(
      &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
      rusqlite::params![id],
      RawTodo::from_row,
    )
    .optional()
}

/// Surface a decoding failure from inside a connection call.
fn boxed(e: crate::Error) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(Box::new(e))
}

// ─── TodoStore impl ──────────────────────────────────────────────────────────

impl TodoStore for SqliteStore {
  type Error = crate::Error;

  async fn list_todos(&self) -> Result<Vec<Todo>> {
    let raws: Vec<RawTodo> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawTodo::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTodo::into_todo).collect()
  }

  async fn get_todo(&self, id: i64) -> Result<Option<Todo>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_by_id(conn, id)?))
      .await?;

    raw.map(RawTodo::into_todo).transpose()
  }

  async fn create_todo(&self, fields: TodoFields) -> Result<Todo> {
    let TodoFields { title, completed, due_date } = fields;

    let raw: RawTodo = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO todos (title, completed, due_date) VALUES (?1, ?2, ?3)",
          rusqlite::params![title, completed, due_date],
        )?;
        let id = conn.last_insert_rowid();
        Ok(select_by_id(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?)
      })
      .await?;

    raw.into_todo()
  }

  async fn update_todo(&self, id: i64, patch: TodoPatch) -> Result<Option<Todo>> {
    let raw: Option<RawTodo> = self
      .conn
      .call(move |conn| {
        let Some(current) = select_by_id(conn, id)? else {
          return Ok(None);
        };
        if patch.is_empty() {
          return Ok(Some(current));
        }

        let merged = patch.merge(&current.into_todo().map_err(boxed)?);
        conn.execute(
          "UPDATE todos SET title = ?1, completed = ?2, due_date = ?3 WHERE id = ?4",
          rusqlite::params![merged.title, merged.completed, merged.due_date, id],
        )?;
        Ok(select_by_id(conn, id)?)
      })
      .await?;

    raw.map(RawTodo::into_todo).transpose()
  }

  async fn delete_todo(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM todos WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(removed > 0)
  }
}
