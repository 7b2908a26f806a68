/// Core types and enums used throughout the domain layer
///
/// This module defines the mood scale, the time-of-day buckets, the theme
/// preference and the entry identifier used by MoodEntry and the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a mood entry
///
/// Fresh ids are UUID v4 strings, but any string read back from storage is
/// accepted as-is so older exports keep their identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    /// Generate a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier string
    pub fn from_string(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The eight mood categories a user can log, ordered from best to worst
///
/// Each mood maps to a numeric valence used by streak summaries and trend
/// averages. The scale runs from 5 (joyful) down to -2 (depressed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Joyful,
    Happy,
    Content,
    Neutral,
    Anxious,
    Stressed,
    Sad,
    Depressed,
}

impl Mood {
    /// Every mood in declaration order
    pub const ALL: [Mood; 8] = [
        Mood::Joyful,
        Mood::Happy,
        Mood::Content,
        Mood::Neutral,
        Mood::Anxious,
        Mood::Stressed,
        Mood::Sad,
        Mood::Depressed,
    ];

    /// Numeric valence for averaging and trend comparison
    pub fn valence(&self) -> i8 {
        match self {
            Mood::Joyful => 5,
            Mood::Happy => 4,
            Mood::Content => 3,
            Mood::Neutral => 2,
            Mood::Anxious => 1,
            Mood::Stressed => 0,
            Mood::Sad => -1,
            Mood::Depressed => -2,
        }
    }

    /// Lowercase name, identical to the stored representation
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Joyful => "joyful",
            Mood::Happy => "happy",
            Mood::Content => "content",
            Mood::Neutral => "neutral",
            Mood::Anxious => "anxious",
            Mood::Stressed => "stressed",
            Mood::Sad => "sad",
            Mood::Depressed => "depressed",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Mood::ALL
            .iter()
            .copied()
            .find(|mood| mood.label() == wanted)
            .ok_or_else(|| DomainError::InvalidMood(s.to_string()))
    }
}

/// Coarse bucket of the wall-clock hour at which a mood was logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Classify an hour of the day (0-23)
    ///
    /// Morning is 05:00-11:59, afternoon 12:00-16:59, evening 17:00-20:59,
    /// and everything else counts as night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TimeOfDay::ALL
            .iter()
            .copied()
            .find(|bucket| bucket.label() == wanted)
            .ok_or_else(|| DomainError::InvalidTimeOfDay(s.to_string()))
    }
}

/// Visual theme preference, persisted next to the mood data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Calm,
    Vibrant,
    Minimal,
    Dark,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Calm => "calm",
            Theme::Vibrant => "vibrant",
            Theme::Minimal => "minimal",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calm" => Ok(Theme::Calm),
            "vibrant" => Ok(Theme::Vibrant),
            "minimal" => Ok(Theme::Minimal),
            "dark" => Ok(Theme::Dark),
            _ => Err(DomainError::InvalidTheme(s.to_string())),
        }
    }
}
