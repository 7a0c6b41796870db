//! SQLite-backed key-value persistence for the primary process.
//!
//! The four authoritative collections are serialized to JSON and stored
//! under fixed keys in a single `kv` table, alongside a schema-version
//! marker that is rewritten on every save and checked at startup.

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::error::StorageError;

use super::data_dir;

/// Version tag written with every save and embedded in exports.
pub const DATA_VERSION: &str = "1.0";

/// Fixed keys for the persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKey {
    Todos,
    Habits,
    FocusSessions,
    Statistics,
}

impl CollectionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKey::Todos => "todos",
            CollectionKey::Habits => "habits",
            CollectionKey::FocusSessions => "focus_sessions",
            CollectionKey::Statistics => "statistics",
        }
    }

    pub const ALL: [CollectionKey; 4] = [
        CollectionKey::Todos,
        CollectionKey::Habits,
        CollectionKey::FocusSessions,
        CollectionKey::Statistics,
    ];
}

const VERSION_KEY: &str = "data_version";

/// Process-local key-value store over SQLite.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/momentum/momentum.db`.
    ///
    /// Creates the file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the
    /// database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::DataDir(e.to_string()))?
            .join("momentum.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a raw value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a raw value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Serialize a collection to JSON under its fixed key.
    pub fn save_collection<T: Serialize>(
        &self,
        key: CollectionKey,
        value: &T,
    ) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::QueryFailed(format!("encode {}: {e}", key.as_str())))?;
        self.kv_set(key.as_str(), &json)
    }

    /// Load and decode a collection from its fixed key.
    ///
    /// `Ok(None)` means the key has never been written. A present but
    /// undecodable value is an error; the caller decides what resets.
    pub fn load_collection<T: DeserializeOwned>(
        &self,
        key: CollectionKey,
    ) -> Result<Option<T>, StorageError> {
        match self.kv_get(key.as_str())? {
            None => Ok(None),
            Some(json) => serde_json::from_str(&json).map(Some).map_err(|e| {
                StorageError::QueryFailed(format!("decode {}: {e}", key.as_str()))
            }),
        }
    }

    /// Stored schema-version tag, if any.
    pub fn read_version(&self) -> Result<Option<String>, StorageError> {
        self.kv_get(VERSION_KEY)
    }

    /// Write the current schema-version tag.
    pub fn write_version(&self) -> Result<(), StorageError> {
        self.kv_set(VERSION_KEY, DATA_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Todo;
    use chrono::NaiveDate;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("missing").unwrap().is_none());
        db.kv_set("greeting", "hello").unwrap();
        assert_eq!(db.kv_get("greeting").unwrap().unwrap(), "hello");
    }

    #[test]
    fn collection_roundtrip() {
        let db = Database::open_memory().unwrap();
        let todos = vec![Todo::new(
            "buy milk",
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        )];
        db.save_collection(CollectionKey::Todos, &todos).unwrap();
        let loaded: Vec<Todo> = db.load_collection(CollectionKey::Todos).unwrap().unwrap();
        assert_eq!(loaded, todos);
    }

    #[test]
    fn absent_collection_loads_as_none() {
        let db = Database::open_memory().unwrap();
        let loaded: Option<Vec<Todo>> = db.load_collection(CollectionKey::Habits).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn corrupt_value_is_a_decode_error() {
        let db = Database::open_memory().unwrap();
        db.kv_set("todos", "{not json").unwrap();
        let loaded: Result<Option<Vec<Todo>>, _> = db.load_collection(CollectionKey::Todos);
        assert!(loaded.is_err());
    }

    #[test]
    fn version_marker_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.read_version().unwrap().is_none());
        db.write_version().unwrap();
        assert_eq!(db.read_version().unwrap().as_deref(), Some(DATA_VERSION));
    }

    #[test]
    fn opens_on_disk_and_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("momentum.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.kv_set("k", "v").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("v"));
    }
}
