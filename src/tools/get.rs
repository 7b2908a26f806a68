/// Tool for reading the mood logged on a given day
///
/// This module implements the mood_get MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{parse_date, MoodEntry};
use crate::storage::KeyValueStorage;
use crate::store::MoodStore;
use crate::tools::ToolError;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetMoodParams {
    /// Day to look up (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GetMoodResponse {
    pub entry: Option<MoodEntry>,
    pub message: String,
}

pub fn get_mood<S: KeyValueStorage>(
    store: &MoodStore<S>,
    params: GetMoodParams,
) -> Result<GetMoodResponse, ToolError> {
    let date = match params.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => store.clock().today(),
    };

    let entry = store.get_entry_by_date(date).cloned();
    let message = match &entry {
        Some(entry) => describe_entry(entry),
        None => format!("No mood logged for {}", date),
    };

    Ok(GetMoodResponse { entry, message })
}

/// One-paragraph description of an entry, shared by the read tools
pub(crate) fn describe_entry(entry: &MoodEntry) -> String {
    let mut text = format!(
        "📅 {}: {} (valence {}, {})\n   ID: {}",
        entry.date,
        entry.mood,
        entry.mood.valence(),
        entry.time_of_day,
        entry.id
    );
    if let Some(note) = entry.note.as_deref().filter(|_| entry.has_note()) {
        text.push_str(&format!("\n   📝 {}", note));
    }
    text
}
