use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::error::{Result, ScoutError};

/// Minimal string key-value persistence, the local-storage equivalent.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ScoutError::Lock("Failed to lock database connection".to_string()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }
}

/// Process-local store. Used in tests and when the database file cannot be opened.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ScoutError::Lock("memory store".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ScoutError::Lock("memory store".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn bookmarks_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("bookmarks.db")
}

/// Opens the bookmark database, falling back to an in-memory store so the app still runs.
pub fn open_default(data_dir: &Path) -> Arc<dyn KeyValueStore> {
    let path = bookmarks_db_path(data_dir);
    match SqliteStore::open(&path) {
        Ok(store) => {
            info!(path = %path.display(), "Opened bookmark store");
            Arc::new(store)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to open bookmark store, saved posts will not persist");
            Arc::new(MemoryStore::default())
        }
    }
}
