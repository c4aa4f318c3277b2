//! Error type for the command-line tool.

use hrexx_core::config::ConfigError;
use hrexx_loader::{BindFailure, LoaderError};
use thiserror::Error;

use crate::structured_log::{LogEntry, LogLevel, Outcome};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("bind: {0}")]
    Bind(#[from] BindFailure),
    #[error("release: {0}")]
    Release(#[from] LoaderError),
    #[error("script not found: {0}")]
    NotFound(String),
}

impl HarnessError {
    /// Process exit status for any failed command.
    pub const EXIT_STATUS: i32 = 1;

    /// Final log line for a command that failed with this error.
    #[must_use]
    pub fn log_entry(&self) -> LogEntry {
        LogEntry::new("", LogLevel::Error, "command_failed")
            .with_outcome(Outcome::Fail)
            .with_exit_code(Self::EXIT_STATUS)
            .with_details(serde_json::json!({ "error": self.to_string() }))
    }
}
