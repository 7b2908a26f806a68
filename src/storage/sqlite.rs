/// SQLite implementation of the key-value storage interface
///
/// Every record lives in one `local_storage` table keyed by the record name,
/// with the value stored as the same string a browser would keep. Writes are
/// upserts, so the last successful `set_item` is what a later read returns.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::{migrations, KeyValueStorage, StorageError};

/// SQLite-based storage implementation
///
/// Holds a single connection; every call runs synchronously on it and is
/// committed before it returns.
pub struct SqliteStorage {
    /// Connection to the journal database
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database file and bring its schema up to date
    ///
    /// Fails with `StorageError::Connection` if the file cannot be opened and
    /// with `StorageError::Migration` if it was written by a newer version.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Open a private in-memory database (used by tests)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteStorage {
    /// Look up one record; a missing row is `Ok(None)`
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// Insert or replace a record, stamping `updated_at`
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    /// Delete a record; deleting a missing key succeeds
    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let removed = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;

        tracing::debug!("Removed '{}' ({} row(s))", key, removed);
        Ok(())
    }
}
