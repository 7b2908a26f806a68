/// Theme and onboarding flags sharing the journal's storage
///
/// Both are stored as plain strings, not JSON.

use crate::domain::Theme;
use crate::storage::{KeyValueStorage, StorageError, ONBOARDED_KEY, THEME_KEY};

/// Saved theme, or the default when missing or unrecognized
pub fn load_theme(storage: &impl KeyValueStorage) -> Theme {
    match storage.get_item(THEME_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unknown stored theme '{}'", raw);
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(e) => {
            tracing::warn!("Could not read theme: {}", e);
            Theme::default()
        }
    }
}

pub fn save_theme(storage: &impl KeyValueStorage, theme: Theme) -> Result<(), StorageError> {
    storage.set_item(THEME_KEY, theme.label())
}

/// True once first-run onboarding has been dismissed
pub fn is_onboarded(storage: &impl KeyValueStorage) -> bool {
    matches!(storage.get_item(ONBOARDED_KEY), Ok(Some(value)) if value == "true")
}

pub fn mark_onboarded(storage: &impl KeyValueStorage) -> Result<(), StorageError> {
    storage.set_item(ONBOARDED_KEY, "true")
}
