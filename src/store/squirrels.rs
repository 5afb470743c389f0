//! Squirrel record store over SQLite.
//!
//! # Invariants
//! - Every persisted record has both `name` and `size`; presence is
//!   enforced by the caller before any mutation reaches this layer.
//! - Ids are assigned by `AUTOINCREMENT` and never reused, even after the
//!   highest-id record is deleted.
//! - `list_all` returns records in ascending id order.

use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;

use super::StoreResult;

/// One persisted squirrel record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Squirrel {
    pub id: i64,
    pub name: String,
    pub size: String,
}

/// SQLite-backed squirrel store
///
/// Owns a single connection; callers serialize access. Every operation is
/// a single statement, so atomicity comes from SQLite itself.
pub struct SquirrelStore {
    conn: Connection,
}

impl SquirrelStore {
    /// Open a database file, creating the table when absent
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        bootstrap_connection(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database, mainly for tests
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        bootstrap_connection(&conn)?;
        Ok(Self { conn })
    }

    /// Insert a new record and return its assigned id
    pub fn create(&self, name: &str, size: &str) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO squirrels (name, size) VALUES (?1, ?2)",
            params![name, size],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All records in ascending id order; empty when none exist
    pub fn list_all(&self) -> StoreResult<Vec<Squirrel>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, size FROM squirrels ORDER BY id ASC")?;
        let mut rows = stmt.query([])?;
        let mut squirrels = Vec::new();
        while let Some(row) = rows.next()? {
            squirrels.push(Squirrel {
                id: row.get(0)?,
                name: row.get(1)?,
                size: row.get(2)?,
            });
        }
        Ok(squirrels)
    }

    /// Look up one record by its raw path token
    ///
    /// The token is compared against the stored integer id, so `"1"`
    /// matches id 1. Non-numeric tokens are an ordinary miss.
    pub fn get(&self, id: &str) -> StoreResult<Option<Squirrel>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare("SELECT id, name, size FROM squirrels WHERE id = ?1")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(Squirrel {
                id: row.get(0)?,
                name: row.get(1)?,
                size: row.get(2)?,
            }));
        }
        Ok(None)
    }

    /// Replace `name` and `size` on an existing record
    ///
    /// Returns `false` when no record matched; never inserts on a miss.
    pub fn update(&self, id: &str, name: &str, size: &str) -> StoreResult<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        let changed = self.conn.execute(
            "UPDATE squirrels SET name = ?2, size = ?3 WHERE id = ?1",
            params![id, name, size],
        )?;
        Ok(changed > 0)
    }

    /// Remove a record; returns `false` when none existed
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        let changed = self
            .conn
            .execute("DELETE FROM squirrels WHERE id = ?1", [id])?;
        Ok(changed > 0)
    }
}

fn parse_id(token: &str) -> Option<i64> {
    token.parse().ok()
}

fn bootstrap_connection(conn: &Connection) -> StoreResult<()> {
    // AUTOINCREMENT keeps ids monotonically increasing across deletes
    conn.execute(
        "CREATE TABLE IF NOT EXISTS squirrels (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            size TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}
