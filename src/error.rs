//! Error types for image generation and editing.

/// Maximum number of characters of an API error body kept for logging.
const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Errors that can occur while generating or editing images.
#[derive(Debug, thiserror::Error)]
pub enum DalleError {
    /// Request parameters failed validation.
    #[error("invalid request: {0}")]
    Validation(String),

    /// API key missing.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned a non-success status code.
    #[error("API error: {status} {reason} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
        /// Error message from the response body.
        message: String,
        /// Error category from the response body.
        kind: Option<String>,
    },

    /// Response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (reading inputs, saving results).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, DalleError>;

/// Collapses whitespace and truncates an error body so it can be logged on one line.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_ERROR_MESSAGE_LEN {
        return collapsed;
    }
    let truncated: String = collapsed.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
    format!("{truncated}...")
}
