//! Invocation logging for siemctl operations.
//!
//! One JSONL entry per command, appended under the XDG state directory
//! with a fallback chain mirroring the session store's.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;

/// Log entry for each siemctl invocation
#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 timestamp
    pub ts: String,

    /// Request ID (UUID)
    pub req_id: String,

    /// Command name
    pub command: String,

    /// Exit code
    pub exit_code: i32,

    /// Duration in milliseconds
    pub duration_ms: u64,

    /// Success flag
    pub ok: bool,

    /// Error details if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl LogEntry {
    /// Discover log file path with fallback chain
    ///
    /// Priority:
    /// 1. $SIEMCTL_LOG_FILE environment variable (explicit override)
    /// 2. $XDG_STATE_HOME/siemplus/ctl.jsonl (XDG standard)
    /// 3. ~/.local/state/siemplus/ctl.jsonl (XDG fallback)
    fn discover_log_path() -> Option<String> {
        // 1. Explicit override
        if let Ok(path) = std::env::var("SIEMCTL_LOG_FILE") {
            return Some(path);
        }

        // 2. XDG_STATE_HOME
        if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
            return Some(format!("{}/siemplus/ctl.jsonl", xdg_state));
        }

        // 3. HOME/.local/state fallback
        if let Ok(home) = std::env::var("HOME") {
            return Some(format!("{}/.local/state/siemplus/ctl.jsonl", home));
        }

        None
    }

    /// Write log entry to file, falling back to stderr on failure so
    /// command output stays clean.
    pub fn write(&self) -> Result<(), std::io::Error> {
        let json = serde_json::to_string(self)?;

        if let Some(path) = Self::discover_log_path() {
            match Self::write_to_file(&json, &path) {
                Ok(()) => return Ok(()),
                Err(_) => {
                    eprintln!("{}", json);
                    return Ok(());
                }
            }
        }

        eprintln!("{}", json);
        Ok(())
    }

    /// Attempt to write log entry to file
    fn write_to_file(json: &str, path: &str) -> Result<(), std::io::Error> {
        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        writeln!(file, "{}", json)?;
        Ok(())
    }

    /// Generate request ID
    pub fn generate_req_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Get current timestamp in ISO 8601 format
    pub fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}
