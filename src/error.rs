//! Error types for Project Server API operations.

use thiserror::Error;

/// Errors that can occur during Project Server API operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Configuration is missing or incomplete.
    #[error("Project Server configuration required: {0}")]
    ConfigMissing(String),

    /// Configuration value could not be used.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// The addressed resource does not exist.
    #[error("Resource not found at {url}: {message}")]
    NotFound { url: String, message: String },

    /// API request failed.
    #[error("Project Server API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// A caller-supplied argument cannot be sent as given.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The response did not have the shape the operation expects.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ProjectError {
    /// True when the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProjectError::NotFound { .. })
    }
}

/// Result type alias for Project Server operations.
pub type Result<T> = core::result::Result<T, ProjectError>;
