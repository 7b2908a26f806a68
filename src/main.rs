/// Main entry point for the Mood Tracker MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use mood_tracker_mcp::MoodTrackerServer;

const DB_FILE_NAME: &str = "mood.db";

/// Pick the first writable location for the journal database
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(".mood_tracker")),
        dirs::data_dir().map(|p| p.join("mood_tracker")),
        dirs::config_dir().map(|p| p.join("mood_tracker")),
        std::env::current_dir().ok().map(|p| p.join(".mood_tracker")),
    ];

    for dir in candidates.iter().flatten() {
        if std::fs::create_dir_all(dir).is_ok() {
            let probe = dir.join(".write_probe");
            if std::fs::write(&probe, b"ok").is_ok() {
                let _ = std::fs::remove_file(&probe);
                return Ok(dir.join(DB_FILE_NAME));
            }
        }
    }

    let fallback = std::env::temp_dir().join("mood_tracker");
    std::fs::create_dir_all(&fallback)?;
    warn!("Using temporary directory for database: {}", fallback.display());
    Ok(fallback.join(DB_FILE_NAME))
}

/// Command line arguments for the Mood Tracker MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(format!("mood_tracker_mcp={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Mood Tracker MCP server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let server = MoodTrackerServer::new(db_path).await?;
    server.run().await?;

    info!("Mood Tracker MCP server shutdown complete");
    Ok(())
}
