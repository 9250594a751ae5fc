//! Error types for bot API operations.

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for bot API operations.
///
/// HTTP-level failures (4xx/5xx) are not errors: they come back as an
/// ordinary [`ApiResponse`](super::ApiResponse) carrying the status.
#[derive(Debug, Error)]
pub enum BotError {
    /// The request never produced a complete response.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The bearer token cannot be used as an `Authorization` header value.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(#[source] http::header::InvalidHeaderValue),

    /// A caller-supplied header name or value was rejected.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The asset ID is empty or contains characters outside `[A-Za-z0-9._-]`.
    #[error("Invalid asset ID '{0}'")]
    InvalidAssetId(String),

    /// The request payload could not be serialized to JSON.
    #[error("Failed to serialize request payload: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response body is not valid JSON.
    #[error("Malformed JSON response (status {status}): {source}")]
    MalformedResponse {
        /// Status of the response that carried the body
        status: http::StatusCode,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

impl BotError {
    /// Returns true for transport-level failures, the ones reported as status `0`
    /// on the callback surface.
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn http_error_is_transparent() {
        let error = BotError::from(HttpError::Timeout);

        assert_eq!(error.to_string(), "Request timed out");
        assert!(error.is_transport_failure());
    }

    #[test]
    fn malformed_response_keeps_status_and_source() {
        let source = serde_json::from_slice::<serde_json::Value>(b"{oops").unwrap_err();
        let error = BotError::MalformedResponse {
            status: http::StatusCode::OK,
            source,
        };

        assert!(error.to_string().contains("status 200 OK"));
        assert!(error.source().is_some());
        assert!(!error.is_transport_failure());
    }

    #[test]
    fn invalid_asset_id_displays_value() {
        let error = BotError::InvalidAssetId("../etc".to_string());

        assert_eq!(error.to_string(), "Invalid asset ID '../etc'");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BotError>();
    }
}
