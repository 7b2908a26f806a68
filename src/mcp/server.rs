/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin, one per line
/// 2. Routes tool calls to the mood store
/// 3. Writes JSON-RPC responses to stdout

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::storage::KeyValueStorage;
use crate::tools::{self, ToolError};
use crate::{MoodTrackerServer, ServerError};

/// MCP server wrapping a mood tracker
pub struct McpServer<S: KeyValueStorage> {
    tracker: MoodTrackerServer<S>,
    initialized: bool,
}

impl<S: KeyValueStorage> McpServer<S> {
    pub fn new(tracker: MoodTrackerServer<S>) -> Self {
        Self {
            tracker,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout until stdin closes
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        Some(self.handle_request(request).await)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn tracker(&self) -> &MoodTrackerServer<S> {
        &self.tracker
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                info!("MCP client finished initialization");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone().unwrap_or(Value::Null);

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Mood Tracker MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        success_value(id, &result)
    }

    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let result = self.call_tool(&tool_params.name, Value::Object(tool_params.arguments));
        success_value(id, &result)
    }

    /// Dispatch a tool call by name
    fn call_tool(&mut self, name: &str, args: Value) -> ToolCallResult {
        debug!("Calling tool '{}'", name);
        let tracker = &mut self.tracker;

        match name {
            "mood_log" => with_params(args, |p| {
                tools::log_mood(tracker.store_mut(), p).map(|r| r.message)
            }),
            "mood_update" => with_params(args, |p| {
                tools::update_mood(tracker.store_mut(), p).map(|r| r.message)
            }),
            "mood_delete" => with_params(args, |p| {
                tools::delete_mood(tracker.store_mut(), p).map(|r| r.message)
            }),
            "mood_get" => with_params(args, |p| {
                tools::get_mood(tracker.store(), p).map(|r| r.message)
            }),
            "mood_list" => with_params(args, |p| {
                tools::list_moods(tracker.store(), p).map(|r| r.message)
            }),
            "mood_status" => with_params(args, |p| {
                tools::get_mood_status(tracker.store(), p).map(|r| r.message)
            }),
            "mood_trends" => with_params(args, |p| {
                tools::get_mood_trends(tracker.store(), tracker.analytics(), p)
                    .map(|(_, message)| message)
            }),
            "mood_export" => with_params(args, |p| tools::export_moods(tracker.store(), p)),
            "mood_reset" => with_params(args, |p| tools::reset_moods(tracker.store_mut(), p)),
            "mood_preferences" => with_params(args, |p| {
                tools::mood_preferences(tracker.store(), p).map(|r| r.message)
            }),
            _ => ToolCallResult::error(format!("Unknown tool: {}", name)),
        }
    }
}

/// Deserialize tool arguments and run the tool, mapping failures to error results
fn with_params<P, F>(args: Value, run: F) -> ToolCallResult
where
    P: DeserializeOwned,
    F: FnOnce(P) -> Result<String, ToolError>,
{
    let params: P = match serde_json::from_value(args) {
        Ok(p) => p,
        Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
    };

    match run(params) {
        Ok(text) => ToolCallResult::success(text),
        Err(e) => {
            warn!("Tool call failed: {}", e);
            ToolCallResult::error(e.to_string())
        }
    }
}

fn success_value<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to encode result: {}", e),
            None,
        ),
    }
}

fn input_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({ "type": "object" }))
}

fn tool(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Tools advertised by `tools/list`
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "mood_log",
            "Log today's mood (or a given day's); logging the same day again replaces it",
            input_schema::<tools::LogMoodParams>(),
        ),
        tool(
            "mood_update",
            "Change the mood, note, date or time of day of an existing entry",
            input_schema::<tools::UpdateMoodParams>(),
        ),
        tool(
            "mood_delete",
            "Delete a mood entry by id",
            input_schema::<tools::DeleteMoodParams>(),
        ),
        tool(
            "mood_get",
            "Show the mood logged on a given day (defaults to today)",
            input_schema::<tools::GetMoodParams>(),
        ),
        tool(
            "mood_list",
            "List logged moods newest first, optionally within a date range",
            input_schema::<tools::ListMoodsParams>(),
        ),
        tool(
            "mood_status",
            "Show the current and best logging streak",
            input_schema::<tools::StatusParams>(),
        ),
        tool(
            "mood_trends",
            "Weekly or monthly mood averages, time-of-day patterns and insights",
            input_schema::<tools::TrendsParams>(),
        ),
        tool(
            "mood_export",
            "Export all entries and the streak as JSON, inline or to a file",
            input_schema::<tools::ExportParams>(),
        ),
        tool(
            "mood_reset",
            "Delete every entry and reset the streak (requires confirm=true)",
            input_schema::<tools::ResetParams>(),
        ),
        tool(
            "mood_preferences",
            "Read or change the theme and the onboarding flag",
            input_schema::<tools::PreferencesParams>(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FixedClock;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    fn server() -> McpServer<MemoryStorage> {
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let tracker = MoodTrackerServer::with_storage(MemoryStorage::new(), Box::new(FixedClock::at(today, 9)));
        McpServer::new(tracker)
    }

    fn call(server: &mut McpServer<MemoryStorage>, line: &str) -> Value {
        let response = tokio_test::block_on(server.process_line(line)).expect("response");
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_initialize_and_notification() {
        let mut server = server();
        let response = call(&mut server, r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#);
        assert_eq!(response["result"]["protocolVersion"], MCP_VERSION);
        assert_eq!(response["result"]["serverInfo"]["name"], "Mood Tracker MCP");

        let none = tokio_test::block_on(
            server.process_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#),
        );
        assert!(none.is_none());
        assert!(server.is_initialized());
    }

    #[test]
    fn test_tools_list_has_schemas() {
        let mut server = server();
        let response = call(&mut server, r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#);
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 10);

        let log = tools.iter().find(|t| t["name"] == "mood_log").unwrap();
        assert!(log["inputSchema"]["properties"]["mood"].is_object());
    }

    #[test]
    fn test_log_through_tools_call() {
        let mut server = server();
        let response = call(
            &mut server,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"mood_log","arguments":{"mood":"joyful","note":"first entry"}}}"#,
        );
        assert_eq!(response["result"]["isError"], false);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Logged joyful mood for 2024-01-03"));

        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert!(server.tracker().store().get_entry_by_date(today).is_some());
    }

    #[test]
    fn test_tool_errors_are_results_not_rpc_errors() {
        let mut server = server();
        let response = call(
            &mut server,
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"mood_log","arguments":{"mood":"grumpy"}}}"#,
        );
        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], true);

        let response = call(
            &mut server,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"mood_fly","arguments":{}}}"#,
        );
        assert_eq!(response["result"]["isError"], true);
    }

    #[test]
    fn test_parse_error_and_unknown_method() {
        let mut server = server();
        let response = call(&mut server, "{not json");
        assert_eq!(response["error"]["code"], error_codes::PARSE_ERROR);

        let response = call(&mut server, r#"{"jsonrpc":"2.0","id":6,"method":"resources/list"}"#);
        assert_eq!(response["error"]["code"], error_codes::METHOD_NOT_FOUND);
    }
}
