//! Error types for the captcha task API client.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;

/// Errors that can occur while solving a captcha task.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Transport-level HTTP failure.
    #[error("captcha API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API reported an error (`errorId != 0`).
    #[error("captcha API error {code}: {description}")]
    Api {
        error_id: i64,
        code: String,
        description: String,
    },

    /// The task reached a terminal non-success status.
    #[error("captcha task {task_id} failed with status '{status}'")]
    TaskFailed { task_id: String, status: String },

    /// The task never left `processing` within the polling budget.
    #[error("captcha task {task_id} still processing after {attempts} polls")]
    PollExhausted { task_id: String, attempts: u32 },

    /// The API answered with a shape this client cannot use.
    #[error("captcha API returned an unexpected payload: {0}")]
    UnexpectedResponse(String),

    /// A challenge image could not be read from disk.
    #[error("failed to read image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        source: std::io::Error,
    },
}
