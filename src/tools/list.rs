/// Tool for listing mood history
///
/// This module implements the mood_list MCP tool. Entries come back newest
/// first, optionally restricted to a date range.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{parse_date, MoodEntry};
use crate::storage::KeyValueStorage;
use crate::store::MoodStore;
use crate::tools::get::describe_entry;
use crate::tools::ToolError;

/// Parameters for listing entries
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListMoodsParams {
    /// First day to include (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Last day to include (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Maximum number of entries to return
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ListMoodsResponse {
    pub entries: Vec<MoodEntry>,
    pub total: usize,
    pub message: String,
}

pub fn list_moods<S: KeyValueStorage>(
    store: &MoodStore<S>,
    params: ListMoodsParams,
) -> Result<ListMoodsResponse, ToolError> {
    let start = params.start_date.as_deref().map(parse_date).transpose()?;
    let end = params.end_date.as_deref().map(parse_date).transpose()?;

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(ToolError::InvalidArgument(format!(
                "start_date {} is after end_date {}",
                start, end
            )));
        }
    }

    let mut matching = store.entries_between(
        start.unwrap_or(NaiveDate::MIN),
        end.unwrap_or(NaiveDate::MAX),
    );
    matching.reverse();
    let total = matching.len();

    let entries: Vec<MoodEntry> = matching
        .into_iter()
        .take(params.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    let message = if entries.is_empty() {
        "No moods logged yet. Log today's mood to get started!".to_string()
    } else {
        let header = format!("📋 **Mood History** ({} of {} entries)\n\n", entries.len(), total);
        let body = entries
            .iter()
            .map(describe_entry)
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{}{}", header, body)
    };

    Ok(ListMoodsResponse {
        entries,
        total,
        message,
    })
}
