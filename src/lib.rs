/// Public library interface for the Mood Tracker MCP server
///
/// This module exports the main server implementation and public types
/// that can be used by other applications or tests.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod store;
mod analytics;
mod tools;
mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{
    KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, ENTRIES_KEY, ONBOARDED_KEY,
    STREAK_KEY, THEME_KEY,
};
pub use store::{
    is_onboarded, load_theme, mark_onboarded, save_theme, ExportError, ExportSnapshot, MoodStore,
};
pub use analytics::{AnalyticsEngine, PeriodSummary, TimeOfDayStats, TrendRange, TrendsReport};
pub use mcp::McpServer;

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main mood tracker server that implements the MCP protocol
///
/// The server owns the mood store (entries plus streak, persisted through a
/// key-value storage) and the analytics engine used for trend reports.
pub struct MoodTrackerServer<S: KeyValueStorage = SqliteStorage> {
    store: MoodStore<S>,
    analytics: AnalyticsEngine,
}

impl MoodTrackerServer<SqliteStorage> {
    /// Create a new mood tracker server backed by the SQLite file at `db_path`
    ///
    /// The schema is created on first use and the saved journal is loaded.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Mood Tracker server with database: {:?}", db_path);

        let storage = SqliteStorage::new(&db_path)?;
        Ok(Self::with_storage(storage, Box::new(SystemClock)))
    }
}

impl<S: KeyValueStorage> MoodTrackerServer<S> {
    /// Build a server over any key-value storage and clock
    pub fn with_storage(storage: S, clock: Box<dyn Clock>) -> Self {
        Self {
            store: MoodStore::load(storage, clock),
            analytics: AnalyticsEngine::new(),
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(
            "Server started successfully, found {} existing entries (current streak {})",
            self.store.entries().len(),
            self.store.streak().current
        );

        let mut mcp_server = McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    pub fn store(&self) -> &MoodStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut MoodStore<S> {
        &mut self.store
    }

    /// Get a reference to the analytics engine (useful for testing)
    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }
}
