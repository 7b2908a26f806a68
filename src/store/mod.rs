/// Mood entry store
///
/// `MoodStore` is the single owner of the entry collection and the streak.
/// Every mutation runs to completion in one synchronous step: change the
/// collection, recalculate the streak, write both records to storage.

pub mod export;
pub mod preferences;

pub use export::*;
pub use preferences::*;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::domain::{
    Clock, EntryId, Mood, MoodEntry, MoodEntryPatch, MoodStreak, TimeOfDay,
};
use crate::storage::{KeyValueStorage, StorageError, ENTRIES_KEY, STREAK_KEY};

/// The mood journal's state container
pub struct MoodStore<S: KeyValueStorage> {
    storage: S,
    clock: Box<dyn Clock>,
    entries: Vec<MoodEntry>,
    streak: MoodStreak,
    persist_warning: Option<StorageError>,
}

impl<S: KeyValueStorage> MoodStore<S> {
    /// Load the store from storage
    ///
    /// Missing or malformed records fall back to an empty collection and a
    /// zero streak; loading never fails. The streak is recalculated once
    /// against the loaded entries and written back only if it changed.
    pub fn load(storage: S, clock: Box<dyn Clock>) -> Self {
        let entries: Vec<MoodEntry> = read_record(&storage, ENTRIES_KEY).unwrap_or_default();
        let streak: MoodStreak = read_record(&storage, STREAK_KEY).unwrap_or_default();

        tracing::info!(
            "Loaded {} mood entries (streak {} / best {})",
            entries.len(),
            streak.current,
            streak.longest
        );

        let mut store = Self {
            storage,
            clock,
            entries,
            streak,
            persist_warning: None,
        };

        let refreshed = store.streak.recalculated(&store.entries, store.clock.today());
        if refreshed != store.streak {
            store.streak = refreshed;
            store.persist_streak();
        }

        store
    }

    /// Log a mood for `date`
    ///
    /// If the date already has an entry its mood, note and time of day are
    /// overwritten and its id is kept; otherwise a new entry is appended.
    pub fn add_entry(
        &mut self,
        date: NaiveDate,
        mood: Mood,
        note: Option<String>,
        time_of_day: TimeOfDay,
    ) -> EntryId {
        let id = match self.entries.iter_mut().find(|e| e.date == date) {
            Some(existing) => {
                existing.mood = mood;
                existing.note = note;
                existing.time_of_day = time_of_day;
                tracing::debug!("Replaced mood for {} ({})", date, existing.id);
                existing.id.clone()
            }
            None => {
                let entry = MoodEntry::new(date, mood, note, time_of_day);
                let id = entry.id.clone();
                tracing::debug!("Added mood for {} ({})", date, id);
                self.entries.push(entry);
                id
            }
        };

        self.commit();
        id
    }

    /// Merge `patch` into the entry with `id`
    ///
    /// Returns false (and changes nothing) when no entry has that id. A date
    /// change onto a day that already belongs to another entry is skipped so
    /// the one-entry-per-day rule holds; the other fields still apply.
    pub fn update_entry(&mut self, id: &EntryId, mut patch: MoodEntryPatch) -> bool {
        let Some(index) = self.entries.iter().position(|e| &e.id == id) else {
            tracing::debug!("update_entry: no entry with id {}", id);
            return false;
        };

        if let Some(new_date) = patch.date {
            let taken = self
                .entries
                .iter()
                .any(|e| &e.id != id && e.date == new_date);
            if taken {
                tracing::warn!(
                    "Not moving entry {} to {}: that day already has an entry",
                    id,
                    new_date
                );
                patch.date = None;
            }
        }

        self.entries[index].apply(patch);
        self.commit();
        true
    }

    /// Remove the entry with `id`; returns false if there was none
    pub fn delete_entry(&mut self, id: &EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != id);
        let removed = self.entries.len() != before;

        if removed {
            tracing::debug!("Deleted entry {}", id);
        }
        self.commit();
        removed
    }

    /// The entry logged for `date`, if any
    pub fn get_entry_by_date(&self, date: NaiveDate) -> Option<&MoodEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    pub fn get_entry(&self, id: &EntryId) -> Option<&MoodEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// All entries in storage order
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// Entries newest first
    pub fn entries_sorted_desc(&self) -> Vec<&MoodEntry> {
        let mut sorted: Vec<&MoodEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Entries dated within `start..=end`, oldest first
    pub fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&MoodEntry> {
        let mut selected: Vec<&MoodEntry> = self
            .entries
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect();
        selected.sort_by(|a, b| a.date.cmp(&b.date));
        selected
    }

    pub fn streak(&self) -> &MoodStreak {
        &self.streak
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Take the last persistence failure, if one happened since the last call
    ///
    /// A failed write never rolls back the in-memory change; the next
    /// successful commit writes the full state again.
    pub fn take_persist_warning(&mut self) -> Option<StorageError> {
        self.persist_warning.take()
    }

    /// Clear both entry and streak records and reset the in-memory state
    ///
    /// Both removals are attempted. If either fails nothing is cleared in
    /// memory and both records are written back from it, so storage never
    /// holds one record without the other.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        let mut failure = None;
        for key in [ENTRIES_KEY, STREAK_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                tracing::warn!("Could not remove '{}' during reset: {}", key, e);
                failure.get_or_insert(e);
            }
        }

        if let Some(e) = failure {
            self.persist_entries();
            self.persist_streak();
            return Err(e);
        }

        self.entries.clear();
        self.streak = MoodStreak::new();

        tracing::info!("Mood data reset");
        Ok(())
    }

    fn commit(&mut self) {
        self.streak = self.streak.recalculated(&self.entries, self.clock.today());
        self.persist_entries();
        self.persist_streak();
    }

    fn persist_entries(&mut self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set_item(ENTRIES_KEY, &json));
        self.note_persist_result(ENTRIES_KEY, result);
    }

    fn persist_streak(&mut self) {
        let result = serde_json::to_string(&self.streak)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set_item(STREAK_KEY, &json));
        self.note_persist_result(STREAK_KEY, result);
    }

    fn note_persist_result(&mut self, key: &str, result: Result<(), StorageError>) {
        if let Err(e) = result {
            tracing::warn!("Failed to persist '{}', keeping change in memory: {}", key, e);
            self.persist_warning = Some(e);
        }
    }
}

/// Read and decode a JSON record, treating any failure as "absent"
fn read_record<T: DeserializeOwned>(storage: &impl KeyValueStorage, key: &str) -> Option<T> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Could not read '{}', using defaults: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Stored '{}' is malformed, using defaults: {}", key, e);
            None
        }
    }
}
