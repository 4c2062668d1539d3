//! The `Todo` record and the write-side shapes used to create and update it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A persisted todo item.
///
/// `id` and `created_at` are assigned by the store on insertion and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
  pub id:         i64,
  pub title:      String,
  pub completed:  bool,
  /// Free-form date text; the service never validates its format.
  pub due_date:   Option<String>,
  pub created_at: NaiveDateTime,
}

/// The caller-writable columns of a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
  pub title:     String,
  pub completed: bool,
  pub due_date:  Option<String>,
}

impl TodoFields {
  /// Fields for a fresh todo: not completed, no due date.
  pub fn new(title: impl Into<String>) -> Self {
    Self { title: title.into(), completed: false, due_date: None }
  }
}

/// A partial update. `None` means "keep the stored value".
///
/// `due_date` is doubly optional so that an explicit `null` (clear the date)
/// is distinguishable from the key being absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
  pub title:     Option<String>,
  pub completed: Option<bool>,
  pub due_date:  Option<Option<String>>,
}

impl TodoPatch {
  /// Resolve the patch against the currently stored row, producing the full
  /// set of columns to write back.
  pub fn merge(self, current: &Todo) -> TodoFields {
    TodoFields {
      title:     self.title.unwrap_or_else(|| current.title.clone()),
      completed: self.completed.unwrap_or(current.completed),
      due_date:  self.due_date.unwrap_or_else(|| current.due_date.clone()),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.title.is_none() && self.completed.is_none() && self.due_date.is_none()
  }
}
