/// Tool for logging the day's mood
///
/// This module implements the mood_log MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{parse_date, Mood, TimeOfDay};
use crate::storage::KeyValueStorage;
use crate::store::MoodStore;
use crate::tools::{with_persist_warning, ToolError};

/// Parameters for logging a mood
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogMoodParams {
    /// One of joyful, happy, content, neutral, anxious, stressed, sad, depressed
    pub mood: String,
    /// Day the mood is for (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
    /// Optional reflection note
    pub note: Option<String>,
    /// morning, afternoon, evening or night; defaults to the current hour's bucket
    pub time_of_day: Option<String>,
}

/// Response from logging a mood
#[derive(Debug, Serialize)]
pub struct LogMoodResponse {
    pub success: bool,
    pub message: String,
    pub entry_id: String,
    pub current_streak: u32,
}

/// Log a mood, replacing any entry already logged for that day
pub fn log_mood<S: KeyValueStorage>(
    store: &mut MoodStore<S>,
    params: LogMoodParams,
) -> Result<LogMoodResponse, ToolError> {
    let mood: Mood = params.mood.parse()?;

    let date = match params.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => store.clock().today(),
    };

    let time_of_day = match params.time_of_day.as_deref() {
        Some(raw) => raw.parse()?,
        None => TimeOfDay::from_hour(store.clock().local_hour()),
    };

    let note = params.note.filter(|n| !n.trim().is_empty());

    let replacing = store.get_entry_by_date(date).is_some();
    let entry_id = store.add_entry(date, mood, note, time_of_day);
    let current_streak = store.streak().current;

    let verb = if replacing { "Updated" } else { "Logged" };
    let message = format!(
        "{} {} mood for {} ({}). Current streak: {} day{}",
        verb,
        mood,
        date,
        time_of_day,
        current_streak,
        if current_streak == 1 { "" } else { "s" }
    );

    Ok(LogMoodResponse {
        success: true,
        message: with_persist_warning(store, message),
        entry_id: entry_id.to_string(),
        current_streak,
    })
}
