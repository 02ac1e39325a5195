//! Custom error types for rustcolleagues.
//!
//! Library functions return `Result<T, ColleagueError>`. The author lookup
//! is the exception: it reports a [`crate::profile::Lookup`] instead of an
//! error so a missing profile never aborts a run.

use thiserror::Error;

/// Main error type for rustcolleagues operations.
#[derive(Debug, Error)]
pub enum ColleagueError {
    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTML or response parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// External API returned an error
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code of the response
        code: i32,
        /// Error message from API
        message: String,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias using `ColleagueError`
pub type Result<T> = std::result::Result<T, ColleagueError>;

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with a parse error message
    fn ok_or_parse(self, msg: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_parse(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| ColleagueError::Parse(msg.to_string()))
    }
}
