/// Integration tests covering persistence and the MCP surface
mod basic_integration;
