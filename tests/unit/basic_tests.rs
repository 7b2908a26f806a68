/// Basic unit tests to verify core functionality
use chrono::NaiveDate;
use mood_tracker_mcp::*;
use tempfile::NamedTempFile;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn store_on(today: &str) -> MoodStore<MemoryStorage> {
    MoodStore::load(MemoryStorage::new(), Box::new(FixedClock::at(day(today), 10)))
}

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_three_consecutive_days_make_a_streak_of_three() {
        let mut store = store_on("2024-01-03");
        store.add_entry(day("2024-01-01"), Mood::Happy, None, TimeOfDay::Morning);
        store.add_entry(day("2024-01-02"), Mood::Joyful, None, TimeOfDay::Evening);
        store.add_entry(day("2024-01-03"), Mood::Content, None, TimeOfDay::Morning);

        assert_eq!(store.streak().current, 3);
        assert!(store.streak().longest >= 3);
        assert_eq!(store.streak().last_updated, Some(day("2024-01-03")));
    }

    #[test]
    fn test_gap_breaks_the_streak() {
        let mut store = store_on("2024-01-03");
        store.add_entry(day("2024-01-01"), Mood::Sad, None, TimeOfDay::Night);
        store.add_entry(day("2024-01-03"), Mood::Neutral, None, TimeOfDay::Morning);

        assert_eq!(store.streak().current, 1);
    }

    #[test]
    fn test_streak_is_left_alone_without_an_entry_today() {
        let mut store = store_on("2024-01-03");
        store.add_entry(day("2024-01-01"), Mood::Happy, None, TimeOfDay::Morning);
        store.add_entry(day("2024-01-02"), Mood::Happy, None, TimeOfDay::Morning);

        assert_eq!(store.streak(), &MoodStreak::default());
    }

    #[test]
    fn test_empty_store_has_default_streak_and_no_entries() {
        let store = store_on("2024-01-03");
        assert!(store.get_entry_by_date(day("2024-01-03")).is_none());
        assert_eq!(store.streak().current, 0);
        assert_eq!(store.streak().longest, 0);
        assert_eq!(store.streak().last_updated, None);
    }

    #[test]
    fn test_logging_same_day_twice_keeps_one_entry() {
        let mut store = store_on("2024-01-03");
        let first = store.add_entry(day("2024-01-03"), Mood::Anxious, None, TimeOfDay::Morning);
        let second = store.add_entry(
            day("2024-01-03"),
            Mood::Happy,
            Some("better after lunch".to_string()),
            TimeOfDay::Afternoon,
        );

        assert_eq!(first, second);
        assert_eq!(store.entries().len(), 1);

        let entry = store.get_entry_by_date(day("2024-01-03")).unwrap();
        assert_eq!(entry.mood, Mood::Happy);
        assert_eq!(entry.time_of_day, TimeOfDay::Afternoon);
        assert!(entry.has_note());
    }

    #[test]
    fn test_update_and_delete_unknown_ids_are_no_ops() {
        let mut store = store_on("2024-01-03");
        store.add_entry(day("2024-01-03"), Mood::Content, None, TimeOfDay::Morning);

        let missing = EntryId::from_string("nope");
        let patch = MoodEntryPatch {
            mood: Some(Mood::Sad),
            ..Default::default()
        };
        assert!(!store.update_entry(&missing, patch));
        assert!(!store.delete_entry(&missing));
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].mood, Mood::Content);
    }

    #[test]
    fn test_mood_valence_and_parsing() {
        assert_eq!(Mood::Joyful.valence(), 5);
        assert_eq!(Mood::Depressed.valence(), -2);
        assert_eq!(" Stressed ".parse::<Mood>().unwrap(), Mood::Stressed);
        assert!("grumpy".parse::<Mood>().is_err());
    }

    #[test]
    fn test_time_of_day_buckets() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(2), TimeOfDay::Night);
    }

    #[test]
    fn test_weekly_summaries_start_on_sunday() {
        let mut store = store_on("2024-01-10");
        // 2024-01-06 is a Saturday, 2024-01-07 a Sunday
        store.add_entry(day("2024-01-06"), Mood::Happy, None, TimeOfDay::Morning);
        store.add_entry(day("2024-01-07"), Mood::Sad, None, TimeOfDay::Morning);
        store.add_entry(day("2024-01-08"), Mood::Joyful, None, TimeOfDay::Morning);

        let weeks = AnalyticsEngine::new().weekly_summaries(store.entries());
        let periods: Vec<&str> = weeks.iter().map(|w| w.period.as_str()).collect();
        assert_eq!(periods, vec!["2023-12-31", "2024-01-07"]);
        assert_eq!(weeks[1].total(), 2);
    }

    #[tokio::test]
    async fn test_server_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = MoodTrackerServer::new(temp_file.path().to_path_buf()).await;
        assert!(server.is_ok());
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path()).expect("Failed to create storage");

        storage.set_item(THEME_KEY, "dark").unwrap();
        assert_eq!(storage.get_item(THEME_KEY).unwrap().as_deref(), Some("dark"));
        storage.remove_item(THEME_KEY).unwrap();
        assert_eq!(storage.get_item(THEME_KEY).unwrap(), None);
    }
}
