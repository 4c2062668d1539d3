//! Integration tests for `SqliteStore` against an in-memory database, plus
//! migration tests against raw `rusqlite` connections.

use todo_core::{TodoFields, TodoPatch, TodoStore};

use crate::{SqliteStore, schema};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Create / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty_store() {
  let s = store().await;
  assert!(s.list_todos().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_assigns_id_and_defaults() {
  let s = store().await;

  let todo = s.create_todo(TodoFields::new("Buy milk")).await.unwrap();
  assert_eq!(todo.id, 1);
  assert_eq!(todo.title, "Buy milk");
  assert!(!todo.completed);
  assert_eq!(todo.due_date, None);

  let fetched = s.get_todo(todo.id).await.unwrap().expect("stored row");
  assert_eq!(fetched, todo);
}

#[tokio::test]
async fn create_keeps_supplied_fields() {
  let s = store().await;

  let todo = s
    .create_todo(TodoFields {
      title:     "File taxes".into(),
      completed: true,
      due_date:  Some("2027-04-15".into()),
    })
    .await
    .unwrap();
  assert!(todo.completed);
  assert_eq!(todo.due_date.as_deref(), Some("2027-04-15"));
}

#[tokio::test]
async fn empty_title_is_accepted() {
  let s = store().await;
  let todo = s.create_todo(TodoFields::new("")).await.unwrap();
  assert_eq!(todo.title, "");
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_todo(999).await.unwrap().is_none());
}

/// Overwrite a row's `created_at` so ordering does not hinge on insert timing.
async fn backdate(s: &SqliteStore, id: i64, created_at: &'static str) {
  s.conn
    .call(move |conn| {
      conn.execute(
        "UPDATE todos SET created_at = ?1 WHERE id = ?2",
        rusqlite::params![created_at, id],
      )?;
      Ok(())
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn list_orders_by_created_at_not_id() {
  let s = store().await;
  let a = s.create_todo(TodoFields::new("first")).await.unwrap();
  let b = s.create_todo(TodoFields::new("second")).await.unwrap();
  let c = s.create_todo(TodoFields::new("third")).await.unwrap();

  backdate(&s, a.id, "2099-01-01 00:00:00").await;
  backdate(&s, c.id, "2000-01-01 00:00:00").await;

  let ids: Vec<i64> = s.list_todos().await.unwrap().iter().map(|t| t.id).collect();
  assert_eq!(ids, vec![a.id, b.id, c.id]);
}

#[tokio::test]
async fn same_second_inserts_list_newest_id_first() {
  let s = store().await;
  let a = s.create_todo(TodoFields::new("first")).await.unwrap();
  let b = s.create_todo(TodoFields::new("second")).await.unwrap();

  backdate(&s, a.id, "2026-10-17 12:00:00").await;
  backdate(&s, b.id, "2026-10-17 12:00:00").await;

  let ids: Vec<i64> = s.list_todos().await.unwrap().iter().map(|t| t.id).collect();
  assert_eq!(ids, vec![b.id, a.id]);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_changes_only_supplied_fields() {
  let s = store().await;
  let todo = s
    .create_todo(TodoFields {
      title:     "Buy milk".into(),
      completed: false,
      due_date:  Some("2026-10-20".into()),
    })
    .await
    .unwrap();

  let updated = s
    .update_todo(todo.id, TodoPatch {
      completed: Some(true),
      ..Default::default()
    })
    .await
    .unwrap()
    .expect("existing row");

  assert_eq!(updated.id, todo.id);
  assert_eq!(updated.title, "Buy milk");
  assert!(updated.completed);
  assert_eq!(updated.due_date.as_deref(), Some("2026-10-20"));
  assert_eq!(updated.created_at, todo.created_at);
}

#[tokio::test]
async fn update_can_clear_due_date() {
  let s = store().await;
  let todo = s
    .create_todo(TodoFields {
      title:     "Call mum".into(),
      completed: false,
      due_date:  Some("tomorrow".into()),
    })
    .await
    .unwrap();

  let updated = s
    .update_todo(todo.id, TodoPatch {
      due_date: Some(None),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.due_date, None);
}

#[tokio::test]
async fn empty_patch_returns_row_unchanged() {
  let s = store().await;
  let todo = s.create_todo(TodoFields::new("Walk dog")).await.unwrap();

  let same = s
    .update_todo(todo.id, TodoPatch::default())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(same, todo);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let result = s
    .update_todo(42, TodoPatch {
      title: Some("ghost".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(result.is_none());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_row() {
  let s = store().await;
  let keep = s.create_todo(TodoFields::new("keep")).await.unwrap();
  let gone = s.create_todo(TodoFields::new("gone")).await.unwrap();

  assert!(s.delete_todo(gone.id).await.unwrap());
  assert!(s.get_todo(gone.id).await.unwrap().is_none());

  let ids: Vec<i64> = s.list_todos().await.unwrap().iter().map(|t| t.id).collect();
  assert_eq!(ids, vec![keep.id]);
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete_todo(999).await.unwrap());
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;
  let first = s.create_todo(TodoFields::new("one")).await.unwrap();
  s.delete_todo(first.id).await.unwrap();

  let second = s.create_todo(TodoFields::new("two")).await.unwrap();
  assert!(second.id > first.id);
}

// ─── Schema / migration ──────────────────────────────────────────────────────

#[test]
fn migrate_creates_all_columns() {
  let conn = rusqlite::Connection::open_in_memory().unwrap();
  schema::migrate(&conn).unwrap();

  let cols = schema::column_names(&conn).unwrap();
  assert_eq!(cols, vec!["id", "title", "completed", "due_date", "created_at"]);
}

#[test]
fn migrate_adds_due_date_to_legacy_table() {
  let conn = rusqlite::Connection::open_in_memory().unwrap();
  conn
    .execute_batch(
      "CREATE TABLE todos (
         id         INTEGER PRIMARY KEY AUTOINCREMENT,
         title      TEXT NOT NULL,
         completed  BOOLEAN NOT NULL DEFAULT 0,
         created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
       );
       INSERT INTO todos (title, completed) VALUES ('legacy', 1);",
    )
    .unwrap();

  schema::migrate(&conn).unwrap();

  let cols = schema::column_names(&conn).unwrap();
  assert!(cols.iter().any(|c| c == "due_date"), "columns: {cols:?}");

  let (title, due): (String, Option<String>) = conn
    .query_row("SELECT title, due_date FROM todos", [], |r| {
      Ok((r.get(0)?, r.get(1)?))
    })
    .unwrap();
  assert_eq!(title, "legacy");
  assert_eq!(due, None);
}

#[test]
fn migrate_is_idempotent() {
  let conn = rusqlite::Connection::open_in_memory().unwrap();
  schema::migrate(&conn).unwrap();
  conn
    .execute("INSERT INTO todos (title) VALUES ('survivor')", [])
    .unwrap();

  schema::migrate(&conn).unwrap();
  schema::migrate(&conn).unwrap();

  let cols = schema::column_names(&conn).unwrap();
  assert_eq!(cols.len(), 5);
  let count: i64 = conn
    .query_row("SELECT COUNT(*) FROM todos", [], |r| r.get(0))
    .unwrap();
  assert_eq!(count, 1);
}

#[tokio::test]
async fn open_creates_missing_directory_and_persists() {
  let dir = std::env::temp_dir().join(format!(
    "todo-store-sqlite-test-{}",
    std::process::id()
  ));
  let path = dir.join("nested").join("todos.db");
  let _ = std::fs::remove_dir_all(&dir);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create_todo(TodoFields::new("durable")).await.unwrap();
  }
  assert!(path.exists());

  let reopened = SqliteStore::open(&path).await.unwrap();
  let todos = reopened.list_todos().await.unwrap();
  assert_eq!(todos.len(), 1);
  assert_eq!(todos[0].title, "durable");

  drop(reopened);
  let _ = std::fs::remove_dir_all(&dir);
}
