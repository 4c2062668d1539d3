//! SQL schema and startup migration for the todo store.

use tracing::info;

/// Table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `AUTOINCREMENT` keeps SQLite from handing out the id of a deleted row.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    completed   BOOLEAN NOT NULL DEFAULT 0,
    due_date    TEXT,                              -- unvalidated date text
    created_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
";

/// Columns added after the first release, with the DDL that adds each one.
const ADDED_COLUMNS: &[(&str, &str)] =
  &[("due_date", "ALTER TABLE todos ADD COLUMN due_date TEXT")];

/// Create the table if needed, then add any column an older database lacks.
///
/// Checks `PRAGMA table_info` before altering, so running this on an
/// up-to-date database changes nothing.
pub fn migrate(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.execute_batch(SCHEMA)?;

  let existing = column_names(conn)?;
  for (column, ddl) in ADDED_COLUMNS {
    if !existing.iter().any(|c| c.as_str() == *column) {
      info!(column, "adding missing column to todos");
      conn.execute_batch(ddl)?;
    }
  }
  Ok(())
}

pub(crate) fn column_names(conn: &rusqlite::Connection) -> rusqlite::Result<Vec<String>> {
  let mut stmt = conn.prepare("PRAGMA table_info(todos)")?;
  let names = stmt
    .query_map([], |row| row.get::<_, String>(1))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(names)
}
