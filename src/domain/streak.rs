/// Streak calculation and tracking functionality
///
/// This module defines the MoodStreak struct that holds the logging streak
/// and provides the pure recalculation run after every change to the entry
/// collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::MoodEntry;

/// Number of days treated as a full streak goal by `progress_percent`
const STREAK_GOAL_DAYS: u32 = 30;

/// Consecutive-day logging streak
///
/// `longest` never decreases across recalculations. `last_updated` is the
/// "today" of the last recalculation that actually ran, and is stored as an
/// empty string until then.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStreak {
    /// Consecutive days ending today with a logged entry
    pub current: u32,
    /// Best `current` ever observed
    pub longest: u32,
    #[serde(with = "optional_day")]
    pub last_updated: Option<NaiveDate>,
}

impl MoodStreak {
    /// Create an empty streak (`current=0, longest=0, lastUpdated=""`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Recalculate the streak for `today` from the full entry collection
    ///
    /// Returns an unchanged copy when there are no entries, or when the most
    /// recent entry is not dated today: a missed day does not reset
    /// `current`, it only goes stale until the next entry for today.
    /// Otherwise counts consecutive days backwards from today and stops at
    /// the first gap that is not exactly one day.
    pub fn recalculated(&self, entries: &[MoodEntry], today: NaiveDate) -> Self {
        let mut dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));

        let Some(&latest) = dates.first() else {
            return self.clone();
        };
        if latest != today {
            return self.clone();
        }

        let mut current = 1;
        let mut previous = latest;
        for &date in dates.iter().skip(1) {
            if (previous - date).num_days() == 1 {
                current += 1;
                previous = date;
            } else {
                break;
            }
        }

        Self {
            current,
            longest: self.longest.max(current),
            last_updated: Some(today),
        }
    }

    /// Encouragement text for the current streak length
    pub fn message(&self) -> String {
        match self.current {
            0 => "No streak yet. Log today's mood to start one.".to_string(),
            1 => "Great start! You've logged your mood for 1 day.".to_string(),
            2 => format!("You've logged your mood for {} days in a row!", self.current),
            3..=6 => format!("Amazing! {} days of consistent tracking!", self.current),
            7..=13 => format!("Impressive! A {}-day streak shows real commitment!", self.current),
            14..=29 => format!("Incredible discipline! {} days and counting!", self.current),
            _ => format!("Wow! {} days is a life-changing habit!", self.current),
        }
    }

    /// Progress toward a 30-day streak, capped at 100
    pub fn progress_percent(&self) -> f64 {
        (f64::from(self.current) / f64::from(STREAK_GOAL_DAYS) * 100.0).min(100.0)
    }
}

/// Longest run of consecutive calendar days anywhere in the history
///
/// Informational only; it is not folded into `MoodStreak::longest`, which
/// tracks what the streak itself has reached.
pub fn longest_run_in_history(entries: &[MoodEntry]) -> u32 {
    let mut dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
    dates.sort_unstable();
    dates.dedup();

    let Some(&first) = dates.first() else {
        return 0;
    };

    let mut longest = 1;
    let mut run = 1;
    let mut last = first;
    for &date in dates.iter().skip(1) {
        if (date - last).num_days() == 1 {
            run += 1;
        } else {
            longest = longest.max(run);
            run = 1;
        }
        last = date;
    }

    longest.max(run)
}

/// Serde adapter storing `None` as `""` and a date as `YYYY-MM-DD`
mod optional_day {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(D::Error::custom)
    }
}
