/// Tool for editing an existing mood entry
///
/// This module implements the mood_update MCP tool. Only the fields that are
/// given change; the entry id stays the same.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{parse_date, EntryId, Mood, MoodEntryPatch, TimeOfDay};
use crate::storage::KeyValueStorage;
use crate::store::MoodStore;
use crate::tools::{with_persist_warning, ToolError};

/// Parameters for updating an entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateMoodParams {
    pub entry_id: String,
    pub mood: Option<String>,
    /// New reflection note
    pub note: Option<String>,
    /// Remove the note entirely
    pub clear_note: Option<bool>,
    /// Move the entry to another day (YYYY-MM-DD)
    pub date: Option<String>,
    pub time_of_day: Option<String>,
}

/// Response from updating an entry
#[derive(Debug, Serialize)]
pub struct UpdateMoodResponse {
    pub success: bool,
    pub found: bool,
    pub message: String,
}

pub fn update_mood<S: KeyValueStorage>(
    store: &mut MoodStore<S>,
    params: UpdateMoodParams,
) -> Result<UpdateMoodResponse, ToolError> {
    if params.entry_id.trim().is_empty() {
        return Err(ToolError::InvalidArgument("entry_id cannot be empty".to_string()));
    }

    let note = if params.clear_note.unwrap_or(false) {
        Some(None)
    } else {
        params.note.map(Some)
    };

    let patch = MoodEntryPatch {
        date: params.date.as_deref().map(parse_date).transpose()?,
        mood: params.mood.as_deref().map(str::parse::<Mood>).transpose()?,
        note,
        time_of_day: params
            .time_of_day
            .as_deref()
            .map(str::parse::<TimeOfDay>)
            .transpose()?,
    };

    if patch.is_empty() {
        return Err(ToolError::InvalidArgument(
            "nothing to update: give at least one of mood, note, clear_note, date, time_of_day"
                .to_string(),
        ));
    }

    let id = EntryId::from_string(params.entry_id.trim());
    let found = store.update_entry(&id, patch);

    let message = if found {
        match store.get_entry(&id) {
            Some(entry) => format!("✅ Updated entry for {}: {} ({})", entry.date, entry.mood, entry.time_of_day),
            None => "✅ Updated entry".to_string(),
        }
    } else {
        format!("No entry with id {}; nothing changed", id)
    };

    Ok(UpdateMoodResponse {
        success: true,
        found,
        message: with_persist_warning(store, message),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FixedClock;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    fn params(entry_id: &str) -> UpdateMoodParams {
        UpdateMoodParams {
            entry_id: entry_id.to_string(),
            mood: None,
            note: None,
            clear_note: None,
            date: None,
            time_of_day: None,
        }
    }

    #[test]
    fn test_update_note_and_clear() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let mut store = MoodStore::load(MemoryStorage::new(), Box::new(FixedClock::at(today, 9)));
        let id = store.add_entry(today, Mood::Content, None, TimeOfDay::Morning);

        let response = update_mood(
            &mut store,
            UpdateMoodParams {
                note: Some("coffee helped".to_string()),
                ..params(id.as_str())
            },
        )
        .unwrap();
        assert!(response.found);
        assert_eq!(store.get_entry(&id).unwrap().note.as_deref(), Some("coffee helped"));

        update_mood(
            &mut store,
            UpdateMoodParams {
                clear_note: Some(true),
                ..params(id.as_str())
            },
        )
        .unwrap();
        assert_eq!(store.get_entry(&id).unwrap().note, None);
    }

    #[test]
    fn test_update_unknown_id_reports_not_found() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let mut store = MoodStore::load(MemoryStorage::new(), Box::new(FixedClock::at(today, 9)));

        let response = update_mood(
            &mut store,
            UpdateMoodParams {
                mood: Some("happy".to_string()),
                ..params("nope")
            },
        )
        .unwrap();
        assert!(!response.found);
    }

    #[test]
    fn test_update_requires_a_field() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let mut store = MoodStore::load(MemoryStorage::new(), Box::new(FixedClock::at(today, 9)));

        let result = update_mood(&mut store, params("abc"));
        assert!(matches!(result, Err(ToolError::InvalidArgument(_))));
    }
}
