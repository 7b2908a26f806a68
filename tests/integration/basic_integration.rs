/// Basic integration tests
use chrono::NaiveDate;
use mood_tracker_mcp::*;
use serde_json::{json, Value};
use tempfile::{tempdir, NamedTempFile};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn sqlite_store(path: &std::path::Path, today: &str) -> MoodStore<SqliteStorage> {
    let storage = SqliteStorage::new(path).expect("Failed to open storage");
    MoodStore::load(storage, Box::new(FixedClock::at(day(today), 9)))
}

async fn rpc(server: &mut McpServer<MemoryStorage>, request: Value) -> Value {
    let response = server
        .process_line(&request.to_string())
        .await
        .expect("request should get a response");
    serde_json::to_value(response).unwrap()
}

async fn call_tool(server: &mut McpServer<MemoryStorage>, name: &str, arguments: Value) -> Value {
    let response = rpc(
        server,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }),
    )
    .await;
    response["result"].clone()
}

fn text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap_or_default()
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[test]
    fn test_entries_and_streak_survive_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");

        {
            let mut store = sqlite_store(temp_file.path(), "2024-01-03");
            store.add_entry(day("2024-01-01"), Mood::Happy, None, TimeOfDay::Morning);
            store.add_entry(day("2024-01-02"), Mood::Joyful, None, TimeOfDay::Evening);
            store.add_entry(
                day("2024-01-03"),
                Mood::Content,
                Some("quiet day".to_string()),
                TimeOfDay::Afternoon,
            );
            assert_eq!(store.streak().current, 3);
        }

        let reopened = sqlite_store(temp_file.path(), "2024-01-03");
        assert_eq!(reopened.entries().len(), 3);
        assert_eq!(reopened.streak().current, 3);

        let entry = reopened.get_entry_by_date(day("2024-01-03")).unwrap();
        assert_eq!(entry.mood, Mood::Content);
        assert_eq!(entry.note.as_deref(), Some("quiet day"));
    }

    #[test]
    fn test_stored_record_layout() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        {
            let mut store = sqlite_store(temp_file.path(), "2024-01-03");
            store.add_entry(day("2024-01-03"), Mood::Neutral, None, TimeOfDay::Night);
        }

        let storage = SqliteStorage::new(temp_file.path()).unwrap();
        let entries: Value =
            serde_json::from_str(&storage.get_item(ENTRIES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(entries[0]["date"], "2024-01-03");
        assert_eq!(entries[0]["mood"], "neutral");
        assert_eq!(entries[0]["timeOfDay"], "night");
        assert!(entries[0].get("note").is_none());

        let streak: Value =
            serde_json::from_str(&storage.get_item(STREAK_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(streak, json!({ "current": 1, "longest": 1, "lastUpdated": "2024-01-03" }));
    }

    #[test]
    fn test_reset_clears_both_records() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut store = sqlite_store(temp_file.path(), "2024-01-03");
        store.add_entry(day("2024-01-03"), Mood::Stressed, None, TimeOfDay::Morning);

        store.reset().unwrap();
        assert!(store.entries().is_empty());
        assert_eq!(store.storage().get_item(ENTRIES_KEY).unwrap(), None);
        assert_eq!(store.storage().get_item(STREAK_KEY).unwrap(), None);
    }

    #[test]
    fn test_export_file_contents() {
        let dir = tempdir().unwrap();
        let mut store = MoodStore::load(
            MemoryStorage::new(),
            Box::new(FixedClock::at(day("2024-01-03"), 9)),
        );
        store.add_entry(day("2024-01-03"), Mood::Happy, None, TimeOfDay::Morning);

        let path = store.write_export(dir.path()).unwrap();
        assert!(path.ends_with("mood-tracker-export-2024-01-03.json"));

        let exported: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(exported["entries"].as_array().unwrap().len(), 1);
        assert_eq!(exported["streak"]["current"], 1);
        assert!(exported["exportDate"].as_str().unwrap().starts_with("2024-01-03"));
    }

    #[tokio::test]
    async fn test_server_creation_with_sqlite() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = MoodTrackerServer::new(temp_file.path().to_path_buf())
            .await
            .expect("Failed to create server");

        assert!(server.store().entries().is_empty());
        assert_eq!(server.store().streak().current, 0);
    }

    #[tokio::test]
    async fn test_mcp_journal_workflow() {
        let tracker = MoodTrackerServer::with_storage(
            MemoryStorage::new(),
            Box::new(FixedClock::at(day("2024-01-03"), 19)),
        );
        let mut server = McpServer::new(tracker);

        let init = rpc(
            &mut server,
            json!({ "jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {} }),
        )
        .await;
        assert!(init["result"]["capabilities"]["tools"].is_object());

        for (date, mood) in [("2024-01-01", "happy"), ("2024-01-02", "anxious"), ("2024-01-03", "joyful")] {
            let result = call_tool(&mut server, "mood_log", json!({ "mood": mood, "date": date })).await;
            assert_eq!(result["isError"], false, "{}", text(&result));
        }

        let status = call_tool(&mut server, "mood_status", json!({})).await;
        assert!(text(&status).contains('3'), "{}", text(&status));

        let today = call_tool(&mut server, "mood_get", json!({})).await;
        assert!(text(&today).contains("joyful"), "{}", text(&today));
        assert!(text(&today).contains("evening"), "{}", text(&today));

        let id = server
            .tracker()
            .store()
            .get_entry_by_date(day("2024-01-02"))
            .unwrap()
            .id
            .to_string();

        let updated = call_tool(
            &mut server,
            "mood_update",
            json!({ "entry_id": id, "mood": "content", "note": "turned around" }),
        )
        .await;
        assert_eq!(updated["isError"], false, "{}", text(&updated));
        let entry = server.tracker().store().get_entry_by_date(day("2024-01-02")).unwrap();
        assert_eq!(entry.mood, Mood::Content);
        assert_eq!(entry.note.as_deref(), Some("turned around"));

        let trends = call_tool(&mut server, "mood_trends", json!({ "range": "all" })).await;
        assert_eq!(trends["isError"], false, "{}", text(&trends));

        let deleted = call_tool(&mut server, "mood_delete", json!({ "entry_id": id })).await;
        assert_eq!(deleted["isError"], false, "{}", text(&deleted));
        assert_eq!(server.tracker().store().entries().len(), 2);

        let listed = call_tool(&mut server, "mood_list", json!({})).await;
        assert_eq!(listed["isError"], false, "{}", text(&listed));

        let refused = call_tool(&mut server, "mood_reset", json!({})).await;
        assert_eq!(refused["isError"], true);
        assert_eq!(server.tracker().store().entries().len(), 2);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let tracker = MoodTrackerServer::with_storage(
            MemoryStorage::new(),
            Box::new(FixedClock::at(day("2024-01-03"), 9)),
        );
        let mut server = McpServer::new(tracker);

        let response = server
            .process_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
        assert!(server.process_line("   ").await.is_none());
    }
}
