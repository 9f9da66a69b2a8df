//! Error types for the dashboard client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The page URL cannot be turned into a socket URL
    #[error("Invalid page URL '{0}'")]
    InvalidPageUrl(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An inbound frame is not a valid event
    #[error("Failed to decode event: {0}")]
    Decode(#[from] serde_json::Error),
}
