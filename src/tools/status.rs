/// Tool for checking the logging streak
///
/// This module implements the mood_status MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::MoodStreak;
use crate::storage::KeyValueStorage;
use crate::store::MoodStore;
use crate::tools::ToolError;

/// The status tool takes no arguments
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatusParams {}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub streak: MoodStreak,
    pub logged_today: bool,
    pub total_entries: usize,
    pub message: String,
}

pub fn get_mood_status<S: KeyValueStorage>(
    store: &MoodStore<S>,
    _params: StatusParams,
) -> Result<StatusResponse, ToolError> {
    let streak = store.streak().clone();
    let today = store.clock().today();
    let logged_today = store.get_entry_by_date(today).is_some();
    let total_entries = store.entries().len();

    let mut message = format!(
        "🔥 Current streak: {} day{} | Best: {} day{} | Goal progress: {:.0}%\n{}",
        streak.current,
        if streak.current == 1 { "" } else { "s" },
        streak.longest,
        if streak.longest == 1 { "" } else { "s" },
        streak.progress_percent(),
        streak.message()
    );
    if let Some(updated) = streak.last_updated {
        message.push_str(&format!("\nLast updated: {}", updated));
    }
    if !logged_today {
        message.push_str("\nYou haven't logged a mood today yet.");
        if let Some(last) = store.entries_sorted_desc().first() {
            message.push_str(&format!(" Last entry: {} ({})", last.date, last.mood));
        }
    }
    message.push_str(&format!("\nTotal entries: {}", total_entries));

    Ok(StatusResponse {
        streak,
        logged_today,
        total_entries,
        message,
    })
}
