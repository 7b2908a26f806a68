/// Storage layer for persisting mood data
///
/// The journal keeps its state as a handful of string records under fixed
/// keys, the same layout a browser's local storage would hold. This module
/// defines that key-value interface and its SQLite and in-memory backends.

pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use memory::*;
pub use sqlite::*;

use thiserror::Error;

/// Key holding the JSON array of mood entries
pub const ENTRIES_KEY: &str = "mood-tracker-entries";
/// Key holding the JSON streak object
pub const STREAK_KEY: &str = "mood-tracker-streak";
/// Key holding the theme name as a plain string
pub const THEME_KEY: &str = "mood-tracker-theme";
/// Key holding `"true"` once first-run onboarding has been completed
pub const ONBOARDED_KEY: &str = "mood-tracker-onboarded";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage quota exceeded writing '{key}' (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: usize },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the durable key-value interface
///
/// All calls are synchronous and complete before returning, so the last
/// successful `set_item` is always what a later `get_item` sees.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, if any
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
