/// Tool for reading and changing the theme and onboarding flag
///
/// This module implements the mood_preferences MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::Theme;
use crate::storage::KeyValueStorage;
use crate::store::{is_onboarded, load_theme, mark_onboarded, save_theme, MoodStore};
use crate::tools::ToolError;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PreferencesParams {
    /// New theme: calm, vibrant, minimal or dark
    pub theme: Option<String>,
    /// Set to true once onboarding has been completed
    pub onboarded: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub theme: Theme,
    pub onboarded: bool,
    pub message: String,
}

pub fn mood_preferences<S: KeyValueStorage>(
    store: &MoodStore<S>,
    params: PreferencesParams,
) -> Result<PreferencesResponse, ToolError> {
    let storage = store.storage();

    if let Some(raw) = params.theme.as_deref() {
        save_theme(storage, raw.parse::<Theme>()?)?;
    }
    match params.onboarded {
        Some(true) => mark_onboarded(storage)?,
        Some(false) => {
            return Err(ToolError::InvalidArgument(
                "onboarding cannot be undone; omit 'onboarded' or pass true".to_string(),
            ))
        }
        None => {}
    }

    let theme = load_theme(storage);
    let onboarded = is_onboarded(storage);

    Ok(PreferencesResponse {
        theme,
        onboarded,
        message: format!("🎨 Theme: {} | Onboarding complete: {}", theme, onboarded),
    })
}
