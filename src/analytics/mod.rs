/// Analytics engine for mood trends and insights
///
/// This module groups entries into weekly and monthly summaries, compares
/// moods across times of day, and turns the results into short insights.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use crate::domain::{longest_run_in_history, Mood, MoodEntry, TimeOfDay};

/// Minimum number of entries before insights are generated
const MIN_ENTRIES_FOR_INSIGHTS: usize = 3;

/// Window of trend data to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendRange {
    /// Weekly summaries from the last seven days
    Week,
    /// Monthly summaries from the last month
    #[default]
    Month,
    /// Every monthly summary
    All,
}

impl FromStr for TrendRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(TrendRange::Week),
            "month" => Ok(TrendRange::Month),
            "all" => Ok(TrendRange::All),
            other => Err(format!("Invalid range '{}'. Valid options: week, month, all", other)),
        }
    }
}

impl fmt::Display for TrendRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrendRange::Week => "week",
            TrendRange::Month => "month",
            TrendRange::All => "all",
        })
    }
}

/// Mood counts and average valence for one week or month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// Week start (`YYYY-MM-DD`, a Sunday) or month (`YYYY-MM`)
    pub period: String,
    pub average_mood: f64,
    pub mood_counts: BTreeMap<Mood, u32>,
}

impl PeriodSummary {
    fn empty(period: String) -> Self {
        Self {
            period,
            average_mood: 0.0,
            mood_counts: Mood::ALL.iter().map(|&m| (m, 0)).collect(),
        }
    }

    pub fn total(&self) -> u32 {
        self.mood_counts.values().sum()
    }

    fn finish(&mut self) {
        let total = self.total();
        let sum: i64 = self
            .mood_counts
            .iter()
            .map(|(mood, &count)| i64::from(mood.valence()) * i64::from(count))
            .sum();
        self.average_mood = if total > 0 { sum as f64 / f64::from(total) } else { 0.0 };
    }
}

/// Count and average valence of moods logged in one time-of-day bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayStats {
    pub time_of_day: TimeOfDay,
    pub count: u32,
    pub average: f64,
}

/// Everything the trends view needs in one value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsReport {
    pub range: String,
    pub total_entries: usize,
    pub average_mood: f64,
    pub longest_run: u32,
    pub periods: Vec<PeriodSummary>,
    pub time_of_day: Vec<TimeOfDayStats>,
    pub insights: Vec<String>,
}

/// Analytics engine for processing mood entries
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// Summaries per week, weeks starting on Sunday, oldest first
    pub fn weekly_summaries(&self, entries: &[MoodEntry]) -> Vec<PeriodSummary> {
        summarize_by(entries, |date| week_start(date).format("%Y-%m-%d").to_string())
    }

    /// Summaries per calendar month, oldest first
    pub fn monthly_summaries(&self, entries: &[MoodEntry]) -> Vec<PeriodSummary> {
        summarize_by(entries, |date| date.format("%Y-%m").to_string())
    }

    /// Stats for every bucket in morning, afternoon, evening, night order
    pub fn time_of_day_stats(&self, entries: &[MoodEntry]) -> Vec<TimeOfDayStats> {
        TimeOfDay::ALL
            .iter()
            .map(|&bucket| {
                let values: Vec<i8> = entries
                    .iter()
                    .filter(|e| e.time_of_day == bucket)
                    .map(|e| e.mood.valence())
                    .collect();
                TimeOfDayStats {
                    time_of_day: bucket,
                    count: values.len() as u32,
                    average: average(&values),
                }
            })
            .collect()
    }

    /// Average valence over all entries, 0 when there are none
    pub fn average_mood(&self, entries: &[MoodEntry]) -> f64 {
        let values: Vec<i8> = entries.iter().map(|e| e.mood.valence()).collect();
        average(&values)
    }

    /// Period summaries restricted to `range`, relative to `today`
    pub fn filter_range(
        &self,
        entries: &[MoodEntry],
        range: TrendRange,
        today: NaiveDate,
    ) -> Vec<PeriodSummary> {
        match range {
            TrendRange::All => self.monthly_summaries(entries),
            TrendRange::Week => {
                let cutoff = today - Duration::days(7);
                self.weekly_summaries(entries)
                    .into_iter()
                    .filter(|summary| {
                        NaiveDate::parse_from_str(&summary.period, "%Y-%m-%d")
                            .map(|start| start >= cutoff)
                            .unwrap_or(false)
                    })
                    .collect()
            }
            TrendRange::Month => {
                let cutoff = today.checked_sub_months(Months::new(1)).unwrap_or(today);
                self.monthly_summaries(entries)
                    .into_iter()
                    .filter(|summary| {
                        NaiveDate::parse_from_str(&format!("{}-01", summary.period), "%Y-%m-%d")
                            .map(|start| start >= cutoff)
                            .unwrap_or(false)
                    })
                    .collect()
            }
        }
    }

    /// Short observations about the user's moods
    ///
    /// With fewer than three entries a single encouragement is returned.
    pub fn generate_insights(&self, entries: &[MoodEntry]) -> Vec<String> {
        if entries.len() < MIN_ENTRIES_FOR_INSIGHTS {
            return vec![
                "Keep logging your moods! We'll generate insights once you have more entries."
                    .to_string(),
            ];
        }

        let mut insights = Vec::new();

        let mut counts: BTreeMap<Mood, u32> = BTreeMap::new();
        for entry in entries {
            *counts.entry(entry.mood).or_insert(0) += 1;
        }
        // Ties keep the earlier winner; neutral is the starting point.
        let count_of = |mood: &Mood| counts.get(mood).copied().unwrap_or(0);
        let mut most_common = Mood::Neutral;
        for mood in Mood::ALL {
            if count_of(&mood) > count_of(&most_common) {
                most_common = mood;
            }
        }
        insights.push(format!("Your most common mood is \"{}\".", most_common));

        let stats = self.time_of_day_stats(entries);
        let mut best = &stats[0];
        for candidate in &stats {
            if candidate.count > 0 && (best.count == 0 || candidate.average > best.average) {
                best = candidate;
            }
        }
        if best.count > 0 {
            insights.push(format!("You tend to feel your best during the {}.", best.time_of_day));
        }

        let weeks = self.weekly_summaries(entries);
        if let [.., previous, latest] = weeks.as_slice() {
            let message = if latest.average_mood > previous.average_mood {
                "Your mood has been improving over the past weeks."
            } else if latest.average_mood < previous.average_mood {
                "Your mood has been declining over the past weeks. Consider what might be affecting your wellbeing."
            } else {
                "Your mood has been relatively stable over the past weeks."
            };
            insights.push(message.to_string());
        }

        insights
    }

    /// Build the full trends report for `range`
    pub fn report(&self, entries: &[MoodEntry], range: TrendRange, today: NaiveDate) -> TrendsReport {
        TrendsReport {
            range: range.to_string(),
            total_entries: entries.len(),
            average_mood: self.average_mood(entries),
            longest_run: longest_run_in_history(entries),
            periods: self.filter_range(entries, range, today),
            time_of_day: self.time_of_day_stats(entries),
            insights: self.generate_insights(entries),
        }
    }
}

/// Sunday on or before `date`
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

fn summarize_by<F>(entries: &[MoodEntry], key: F) -> Vec<PeriodSummary>
where
    F: Fn(NaiveDate) -> String,
{
    let mut periods: BTreeMap<String, PeriodSummary> = BTreeMap::new();
    for entry in entries {
        let period = key(entry.date);
        let summary = periods
            .entry(period.clone())
            .or_insert_with(|| PeriodSummary::empty(period));
        *summary.mood_counts.entry(entry.mood).or_insert(0) += 1;
    }

    periods
        .into_values()
        .map(|mut summary| {
            summary.finish();
            summary
        })
        .collect()
}

fn average(values: &[i8]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64
}
