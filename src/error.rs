//! Error types for sprintboard
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad input shape, bad args, bad config)
//! - 4: Operation failed (unparsable JSON, IO, watcher failure)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the sprintboard CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for sprintboard operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid input shape: {0}")]
    InvalidInputShape(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    // Operation failures (exit code 4)
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Watch failed for {path}: {message}")]
    Watch { path: PathBuf, message: String },
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidInputShape(_)
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::UserNotFound(_) => exit_codes::USER_ERROR,

            Error::MalformedJson(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::Watch { .. } => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured fields for JSON error output, when the variant carries any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Watch { path, message } => Some(serde_json::json!({
                "path": path.to_string_lossy(),
                "message": message,
            })),
            Error::UserNotFound(id) => Some(serde_json::json!({ "user": id })),
            _ => None,
        }
    }
}

/// Result type alias for sprintboard operations
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
            details: err.details(),
        }
    }
}
