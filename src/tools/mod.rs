/// MCP tools for mood journaling
///
/// This module contains all the MCP tools that external clients can call to
/// log moods, inspect the streak and read trends.

pub mod delete;
pub mod export;
pub mod get;
pub mod list;
pub mod log;
pub mod preferences;
pub mod status;
pub mod trends;
pub mod update;

// Re-export tool functions for easy access
pub use delete::*;
pub use export::*;
pub use get::*;
pub use list::*;
pub use log::*;
pub use preferences::*;
pub use status::*;
pub use trends::*;
pub use update::*;

use thiserror::Error;

use crate::domain::DomainError;
use crate::storage::{KeyValueStorage, StorageError};
use crate::store::{ExportError, MoodStore};

/// Errors a tool reports back to the client as an error result
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Append a note about a failed save to a tool's message
pub(crate) fn with_persist_warning<S: KeyValueStorage>(
    store: &mut MoodStore<S>,
    message: String,
) -> String {
    match store.take_persist_warning() {
        Some(e) => format!(
            "{}\n⚠️ Saved for this session, but writing to storage failed: {}",
            message, e
        ),
        None => message,
    }
}
