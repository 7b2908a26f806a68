/// Domain module containing core business logic and data types
///
/// This module defines the core entities (MoodEntry, MoodStreak) together
/// with the mood scale and the clock used to decide what "today" is.

pub mod clock;
pub mod entry;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use clock::*;
pub use entry::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors raised when caller-supplied text cannot be turned into domain values
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid mood: {0} (expected one of joyful, happy, content, neutral, anxious, stressed, sad, depressed)")]
    InvalidMood(String),

    #[error("Invalid time of day: {0} (expected morning, afternoon, evening or night)")]
    InvalidTimeOfDay(String),

    #[error("Invalid theme: {0} (expected calm, vibrant, minimal or dark)")]
    InvalidTheme(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(s: &str) -> Result<chrono::NaiveDate, DomainError> {
    chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(s.to_string()))
}
