//! Error types for the Pipeboard client

use thiserror::Error;

/// Result type for Pipeboard client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur when using the Pipeboard client
#[derive(Debug, Error)]
pub enum Error {
    /// API returned a non-2xx response
    ///
    /// The message is derived from the response body, never the body itself:
    /// the `error` or `detail` JSON field when present, otherwise the raw
    /// text, otherwise `HTTP <status>`.
    #[error("API error ({status}): {message}")]
    Api {
        /// Derived error message
        message: String,
        /// HTTP status code
        status: u16,
    },

    /// HTTP transport or parse failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] pipeboard_http_client::HttpError),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A typed accessor required a JSON body but the response declared
    /// another content type
    #[error("Expected a JSON response, got {0}")]
    NotJson(String),

    /// Filesystem error while writing a download
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error message
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Message to display to the user for this error
    ///
    /// For API errors this is the derived message alone, without the status
    /// prefix; other errors display their full rendering.
    pub fn display_message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
