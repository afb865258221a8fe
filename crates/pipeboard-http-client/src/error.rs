//! HTTP error types

use thiserror::Error;

/// HTTP errors that can occur during requests
#[derive(Debug, Error)]
pub enum HttpError {
    /// HTTP response with a non-2xx status code
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body text
        message: String,
    },
    /// Transport-level failure while performing the request
    #[error("Network error: {0}")]
    Network(String),
    /// Body was required to be JSON but could not be parsed as such
    #[error("Parse error: {0}")]
    Parse(String),
    /// Client or request construction failure
    #[error("Build error: {0}")]
    Build(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            HttpError::Build(err.to_string())
        } else if err.is_decode() {
            HttpError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            HttpError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            HttpError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Parse(err.to_string())
    }
}
