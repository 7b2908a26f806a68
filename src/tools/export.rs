/// Tools for exporting and resetting the journal
///
/// This module implements the mood_export and mood_reset MCP tools.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::storage::KeyValueStorage;
use crate::store::MoodStore;
use crate::tools::ToolError;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExportParams {
    /// Directory to write the export file into; when omitted the JSON is returned inline
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ResetParams {
    /// Must be true; resetting deletes every entry and the streak
    #[serde(default)]
    pub confirm: bool,
}

pub fn export_moods<S: KeyValueStorage>(
    store: &MoodStore<S>,
    params: ExportParams,
) -> Result<String, ToolError> {
    match params.directory.filter(|d| !d.trim().is_empty()) {
        Some(dir) => {
            let path = store.write_export(&PathBuf::from(dir))?;
            Ok(format!(
                "📦 Exported {} entries to {}",
                store.entries().len(),
                path.display()
            ))
        }
        None => {
            let json = store
                .export_snapshot()
                .to_pretty_json()
                .map_err(|e| ToolError::Export(e.into()))?;
            Ok(json)
        }
    }
}

/// Delete all entries and the streak, only when explicitly confirmed
pub fn reset_moods<S: KeyValueStorage>(
    store: &mut MoodStore<S>,
    params: ResetParams,
) -> Result<String, ToolError> {
    if !params.confirm {
        return Err(ToolError::InvalidArgument(
            "reset deletes all mood entries and the streak; call again with confirm=true".to_string(),
        ));
    }

    let removed = store.entries().len();
    store.reset()?;
    Ok(format!("🧹 Deleted {} entries and reset the streak", removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FixedClock, Mood, TimeOfDay};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    fn store() -> MoodStore<MemoryStorage> {
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let mut store = MoodStore::load(MemoryStorage::new(), Box::new(FixedClock::at(today, 9)));
        store.add_entry(today, Mood::Content, None, TimeOfDay::Morning);
        store
    }

    #[test]
    fn test_inline_export_is_json() {
        let store = store();
        let text = export_moods(&store, ExportParams { directory: None }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["entries"].as_array().unwrap().len(), 1);
        assert!(value.get("exportDate").is_some());
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut store = store();
        assert!(reset_moods(&mut store, ResetParams { confirm: false }).is_err());
        assert_eq!(store.entries().len(), 1);

        reset_moods(&mut store, ResetParams { confirm: true }).unwrap();
        assert!(store.entries().is_empty());
    }
}
