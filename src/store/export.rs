/// Export of the journal to a standalone JSON document

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{MoodEntry, MoodStreak};
use crate::storage::KeyValueStorage;
use crate::store::MoodStore;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Everything a user can download: `{ entries, streak, exportDate }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub entries: Vec<MoodEntry>,
    pub streak: MoodStreak,
    pub export_date: DateTime<Utc>,
}

impl ExportSnapshot {
    /// File name used for a download taken on the snapshot's date
    pub fn file_name(&self) -> String {
        format!("mood-tracker-export-{}.json", self.export_date.format("%Y-%m-%d"))
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<S: KeyValueStorage> MoodStore<S> {
    /// Snapshot of the in-memory state, stamped with the clock's current time
    pub fn export_snapshot(&self) -> ExportSnapshot {
        ExportSnapshot {
            entries: self.entries().to_vec(),
            streak: self.streak().clone(),
            export_date: self.clock().now_utc(),
        }
    }

    /// Write a pretty-printed export into `dir` and return the file path
    pub fn write_export(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let snapshot = self.export_snapshot();
        std::fs::create_dir_all(dir)?;

        let path = dir.join(snapshot.file_name());
        std::fs::write(&path, snapshot.to_pretty_json()?)?;

        tracing::info!("Exported {} entries to {}", snapshot.entries.len(), path.display());
        Ok(path)
    }
}
