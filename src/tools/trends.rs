/// Tool for mood trends and insights
///
/// This module implements the mood_trends MCP tool on top of the analytics
/// engine.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::analytics::{AnalyticsEngine, TrendRange, TrendsReport};
use crate::storage::KeyValueStorage;
use crate::store::MoodStore;
use crate::tools::ToolError;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TrendsParams {
    /// 'week', 'month' or 'all' (defaults to 'month')
    pub range: Option<String>,
}

pub fn get_mood_trends<S: KeyValueStorage>(
    store: &MoodStore<S>,
    analytics: &AnalyticsEngine,
    params: TrendsParams,
) -> Result<(TrendsReport, String), ToolError> {
    let range = match params.range.as_deref() {
        Some(raw) => raw.parse::<TrendRange>().map_err(ToolError::InvalidArgument)?,
        None => TrendRange::default(),
    };

    let report = analytics.report(store.entries(), range, store.clock().today());
    let message = render_report(&report);
    Ok((report, message))
}

fn render_report(report: &TrendsReport) -> String {
    if report.total_entries == 0 {
        return "No data yet. Start logging your daily moods to see trends.".to_string();
    }

    let mut lines = vec![
        format!("📊 **Mood Trends** (range: {})", report.range),
        format!(
            "Entries: {} | Average mood: {:.2} | Longest run: {} days",
            report.total_entries, report.average_mood, report.longest_run
        ),
    ];

    if report.periods.is_empty() {
        lines.push("No entries in this range.".to_string());
    }
    for period in &report.periods {
        lines.push(format!(
            "   {}: average {:.2} over {} entr{}",
            period.period,
            period.average_mood,
            period.total(),
            if period.total() == 1 { "y" } else { "ies" }
        ));
    }

    lines.push("Time of day:".to_string());
    for stats in report.time_of_day.iter().filter(|s| s.count > 0) {
        lines.push(format!(
            "   {}: {} entries, average {:.2}",
            stats.time_of_day, stats.count, stats.average
        ));
    }

    lines.push(String::new());
    lines.push(format!("💡 {}", report.insights.join(" ")));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FixedClock, Mood, TimeOfDay};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    #[test]
    fn test_trends_default_range_is_month() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let mut store = MoodStore::load(MemoryStorage::new(), Box::new(FixedClock::at(today, 9)));
        store.add_entry(today, Mood::Happy, None, TimeOfDay::Morning);

        let (report, message) =
            get_mood_trends(&store, &AnalyticsEngine::new(), TrendsParams { range: None }).unwrap();
        assert_eq!(report.range, "month");
        assert_eq!(report.periods.len(), 1);
        assert!(message.contains("Average mood: 4.00"));
    }

    #[test]
    fn test_trends_rejects_unknown_range() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let store = MoodStore::load(MemoryStorage::new(), Box::new(FixedClock::at(today, 9)));
        let result = get_mood_trends(
            &store,
            &AnalyticsEngine::new(),
            TrendsParams { range: Some("decade".to_string()) },
        );
        assert!(matches!(result, Err(ToolError::InvalidArgument(_))));
    }
}
