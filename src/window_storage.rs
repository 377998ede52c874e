//! Durable per-window key/value storage.
//!
//! Values are scoped by a window identity string (the window label, e.g.
//! `main_0`) so two sticky windows never share preferences. The sizing layer
//! only stores the manual-resize flag here.
//!
//! Two implementations:
//! - [`SqliteWindowStorage`] - `~/.sticky/db/window-state.sqlite`, survives restarts
//! - [`MemoryWindowStorage`] - process-local, for tests and the replay tool

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Result, StickyError};

pub trait WindowStorage: Send + Sync {
    fn get(&self, window_id: &str, key: &str) -> Result<Option<String>>;
    fn set(&self, window_id: &str, key: &str, value: &str) -> Result<()>;
}

/// Get the path to the window storage database
pub fn default_db_path() -> PathBuf {
    let sticky_dir = dirs::home_dir()
        .map(|h| h.join(".sticky"))
        .unwrap_or_else(|| PathBuf::from(".sticky"));

    sticky_dir.join("db").join("window-state.sqlite")
}

/// SQLite-backed window storage
pub struct SqliteWindowStorage {
    conn: Mutex<Connection>,
}

impl SqliteWindowStorage {
    /// Open (or create) the database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StickyError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;

        // WAL keeps writes from blocking readers in other windows' processes
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let storage = Self::with_connection(conn)?;
        info!(db_path = %path.display(), "Window storage initialized");
        Ok(storage)
    }

    /// Open the database at the default location
    pub fn open_default() -> Result<Self> {
        Self::open(&default_db_path())
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS window_storage (
                window_id TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (window_id, key)
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl WindowStorage for SqliteWindowStorage {
    fn get(&self, window_id: &str, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock();
        let value = conn
            .query_row(
                "SELECT value FROM window_storage WHERE window_id = ?1 AND key = ?2",
                params![window_id, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, window_id: &str, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            r#"
            INSERT INTO window_storage (window_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(window_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![window_id, key, value, Utc::now().to_rfc3339()],
        )?;
        debug!(window_id, key, value, "Window storage value saved");
        Ok(())
    }
}

/// In-memory window storage
#[derive(Default)]
pub struct MemoryWindowStorage {
    values: Mutex<HashMap<(String, String), String>>,
}

impl MemoryWindowStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WindowStorage for MemoryWindowStorage {
    fn get(&self, window_id: &str, key: &str) -> Result<Option<String>> {
        Ok(self
            .values
            .lock()
            .get(&(window_id.to_string(), key.to_string()))
            .cloned())
    }

    fn set(&self, window_id: &str, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .insert((window_id.to_string(), key.to_string()), value.to_string());
        Ok(())
    }
}
