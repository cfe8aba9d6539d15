//! Error handling for leetfresh

use thiserror::Error;

/// Main error type for leetfresh operations
#[derive(Error, Debug)]
pub enum LeetfreshError {
    #[error("Browser cookie error: {0}")]
    BrowserCookie(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A required external tool is missing. The message carries install
    /// instructions and is shown to the user as-is.
    #[error("{0}")]
    Dependency(String),

    /// An external tool or the browser session is not authenticated. The
    /// message carries the remediation steps and is shown as-is.
    #[error("{0}")]
    Auth(String),

    /// Malformed user input or unparseable repository metadata.
    #[error("{0}")]
    Config(String),

    /// `gh secret set` reported a failure; carries the tool's own error text.
    #[error("{0}")]
    Publish(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for leetfresh operations
pub type Result<T> = std::result::Result<T, LeetfreshError>;
