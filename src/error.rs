//! Error types for tl
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, bad config)
//! - 4: Operation failed (persistence, terminal I/O)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tl CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tl operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("Cannot read tasks file {path}: {source}")]
    ReadTasks {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write tasks file {path}: {source}")]
    WriteTasks {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed tasks file {path}: {source}")]
    ParseTasks {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Malformed task record: {0}")]
    MalformedRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidArgument(_) | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::ReadTasks { .. }
            | Error::WriteTasks { .. }
            | Error::ParseTasks { .. }
            | Error::MalformedRecord(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for tl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: None,
        }
    }
}
