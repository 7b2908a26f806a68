/// MoodEntry entity for daily mood logs
///
/// This module defines the MoodEntry struct that represents the single mood
/// logged for one calendar day, and the partial update applied to it.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{EntryId, Mood, TimeOfDay};

/// One logged mood for one calendar day
///
/// The date is the natural key: the store keeps at most one entry per date.
/// The JSON field names match the persisted layout (`timeOfDay`), so stored
/// collections and exports stay readable by older clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Unique identifier, fixed at creation
    pub id: EntryId,
    /// Calendar day this mood is for (`YYYY-MM-DD`)
    pub date: NaiveDate,
    pub mood: Mood,
    /// Optional reflection note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Bucket of the hour at which the mood was logged
    pub time_of_day: TimeOfDay,
}

impl MoodEntry {
    /// Create a new entry with a fresh identifier
    pub fn new(date: NaiveDate, mood: Mood, note: Option<String>, time_of_day: TimeOfDay) -> Self {
        Self {
            id: EntryId::new(),
            date,
            mood,
            note,
            time_of_day,
        }
    }

    /// Check if this entry has a non-blank note
    pub fn has_note(&self) -> bool {
        self.note.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// Apply a partial update; only the named fields change
    pub fn apply(&mut self, patch: MoodEntryPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(mood) = patch.mood {
            self.mood = mood;
        }
        if let Some(note) = patch.note {
            self.note = note;
        }
        if let Some(time_of_day) = patch.time_of_day {
            self.time_of_day = time_of_day;
        }
    }
}

/// Partial set of fields for `update_entry`
///
/// `None` leaves a field untouched. For the note, `Some(None)` clears it and
/// `Some(Some(text))` replaces it. The id is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntryPatch {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default, deserialize_with = "present")]
    pub note: Option<Option<String>>,
    #[serde(default)]
    pub time_of_day: Option<TimeOfDay>,
}

impl MoodEntryPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.mood.is_none() && self.note.is_none() && self.time_of_day.is_none()
    }
}

// A field that is present (even as null) becomes Some.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
