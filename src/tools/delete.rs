/// Tool for removing a mood entry
///
/// This module implements the mood_delete MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::EntryId;
use crate::storage::KeyValueStorage;
use crate::store::MoodStore;
use crate::tools::{with_persist_warning, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteMoodParams {
    pub entry_id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteMoodResponse {
    pub success: bool,
    pub removed: bool,
    pub message: String,
}

/// Delete an entry by id; an unknown id is reported, not treated as an error
pub fn delete_mood<S: KeyValueStorage>(
    store: &mut MoodStore<S>,
    params: DeleteMoodParams,
) -> Result<DeleteMoodResponse, ToolError> {
    if params.entry_id.trim().is_empty() {
        return Err(ToolError::InvalidArgument("entry_id cannot be empty".to_string()));
    }

    let id = EntryId::from_string(params.entry_id.trim());
    let date = store.get_entry(&id).map(|e| e.date);
    let removed = store.delete_entry(&id);

    let message = match (removed, date) {
        (true, Some(date)) => format!("🗑️ Deleted the mood logged for {}", date),
        _ => format!("No entry with id {}; nothing to delete", id),
    };

    Ok(DeleteMoodResponse {
        success: true,
        removed,
        message: with_persist_warning(store, message),
    })
}
