//! SQLite-backed state storage.
//!
//! Provides a key-value table holding the serialized home record under
//! [`STATE_KEY`].

use rusqlite::{params, Connection};
use std::path::Path;

use super::data_dir;
use super::state::{PersistedState, StateStore};
use crate::error::{Result, StorageError};

/// kv key of the persisted home record.
pub const STATE_KEY: &str = "maison_state";

/// SQLite database for application state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/maisonvital.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("maisonvital.db");
        Self::open_path(&path)
    }

    /// Open (or create) the database at `path`.
    pub fn open_path(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl StateStore for Database {
    fn load(&self) -> Result<Option<PersistedState>> {
        let Some(json) = self.kv_get(STATE_KEY)? else {
            return Ok(None);
        };
        let state = PersistedState::from_json(&json).map_err(|e| StorageError::Corrupt {
            key: STATE_KEY.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(state))
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        let json = state.to_json()?;
        self.kv_set(STATE_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "again").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "again");
    }

    #[test]
    fn state_roundtrip() {
        let mut db = Database::open_memory().unwrap();
        assert!(db.load().unwrap().is_none());

        let mut state = PersistedState::default();
        state.tracked = vec!["asset_002".into()];
        state.stats.total_tasks_completed = 7;
        db.save(&state).unwrap();
        assert_eq!(db.load().unwrap(), Some(state));
    }

    #[test]
    fn corrupt_state_is_reported() {
        let db = Database::open_memory().unwrap();
        db.kv_set(STATE_KEY, "not json").unwrap();
        let err = db.load().unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::Storage(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn open_path_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");
        {
            let mut db = Database::open_path(&path).unwrap();
            let mut state = PersistedState::default();
            state.stats.xp = 33;
            db.save(&state).unwrap();
        }
        let db = Database::open_path(&path).unwrap();
        assert_eq!(db.load().unwrap().unwrap().stats.xp, 33);
    }
}
