//! Decoding between SQLite rows and [`Todo`].
//!
//! `created_at` is filled by SQLite's `CURRENT_TIMESTAMP`, which produces
//! `YYYY-MM-DD HH:MM:SS` text in UTC.

use chrono::NaiveDateTime;
use todo_core::Todo;

use crate::{Error, Result};

/// Column list shared by every `SELECT`, in the order [`RawTodo::from_row`]
/// expects.
pub const TODO_COLUMNS: &str = "id, title, completed, due_date, created_at";

const SQLITE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn decode_created_at(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, SQLITE_TIMESTAMP)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// A row as read from SQLite, before timestamp decoding.
pub struct RawTodo {
  pub id:         i64,
  pub title:      String,
  pub completed:  bool,
  pub due_date:   Option<String>,
  pub created_at: String,
}

impl RawTodo {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawTodo {
      id:         row.get(0)?,
      title:      row.get(1)?,
      completed:  row.get(2)?,
      due_date:   row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_todo(self) -> Result<Todo> {
    Ok(Todo {
      id:         self.id,
      title:      self.title,
      completed:  self.completed,
      due_date:   self.due_date,
      created_at: decode_created_at(&self.created_at)?,
    })
  }
}
