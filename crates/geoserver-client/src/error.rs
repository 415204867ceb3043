//! Error types for the GeoServer client.

use thiserror::Error;

/// Result type alias using ClientError.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while talking to the catalog.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("{method} {url} returned HTTP {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// The response body did not match the documented resource-tree shape.
    #[error("unexpected catalog response from {url}: {message}")]
    Format { url: String, message: String },

    /// Caller asked for something the API cannot express.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
