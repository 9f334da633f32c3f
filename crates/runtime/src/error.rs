//! Error types for the extlaunch runtime.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while launching or driving a browser.
#[derive(Debug, Error)]
pub enum Error {
    /// No browser executable could be located.
    #[error("browser executable not found. Install Chromium or set EXTLAUNCH_BROWSER")]
    BrowserNotFound,

    /// The browser process failed to start or died during startup.
    #[error("failed to launch browser: {0}")]
    LaunchFailed(String),

    /// The DevTools WebSocket could not be established.
    #[error("failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Protocol-level problem (malformed or unexpected message).
    #[error("protocol error: {0}")]
    ProtocolError(String),

    /// The browser rejected a command.
    #[error("browser returned error {code}: {message}")]
    Cdp { code: i64, message: String },

    /// Navigation was issued but did not succeed.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed { url: String, reason: String },

    /// The extension directory failed validation before launch.
    #[error("invalid extension directory {}: {reason}", path.display())]
    InvalidExtension { path: PathBuf, reason: String },

    /// The target URL failed validation before launch.
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),

    /// Timeout waiting for an operation.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The connection to the browser closed while a request was in flight.
    #[error("connection closed unexpectedly")]
    ConnectionClosed,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }

    /// Returns true if the failure happened before any page work started.
    pub fn is_launch_failure(&self) -> bool {
        matches!(
            self,
            Error::BrowserNotFound
                | Error::LaunchFailed(_)
                | Error::ConnectionFailed(_)
                | Error::InvalidExtension { .. }
        )
    }

    /// Returns true if this is a navigation failure.
    pub fn is_navigation_failure(&self) -> bool {
        matches!(self, Error::NavigationFailed { .. })
    }
}
