//! Error types for transport operations.

use thiserror::Error;

/// Error type for transport operations.
///
/// Every variant is a transport-level failure: the request never produced a
/// complete HTTP response. Non-2xx statuses are not errors at this layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, refused connections, TLS
    /// handshake errors and connections dropped mid-body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out and was aborted.
    #[error("Request timed out")]
    Timeout,

    /// The request URL could not be built or was rejected by the client.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body grew past the configured limit.
    #[error("Response body exceeded {limit} bytes")]
    ResponseTooLarge {
        /// Configured maximum body size in bytes
        limit: usize,
    },
}

impl HttpError {
    /// Returns true if this error was caused by the request timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
