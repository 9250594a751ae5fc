//! Wire-level request and response values, and the transport seam.

use std::time::Duration;

use super::HttpError;

/// One outgoing API call, fully prepared.
///
/// Headers are already merged and the body already encoded; transports
/// send it as-is.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method
    pub method: http::Method,
    /// Absolute endpoint URL, including any query string
    pub url: url::Url,
    /// Final header set
    pub headers: http::HeaderMap,
    /// Encoded body, if any
    pub body: Option<Vec<u8>>,
    /// Abort once the connection makes no progress for this long
    pub idle_timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a request with no headers, no body and no timeout.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
            idle_timeout: None,
        }
    }

    /// Endpoint as it appears in logs, e.g. `/bot/messages?ignore_missing=false`.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        let path = self.url.path();
        self.url
            .query()
            .map_or_else(|| path.to_string(), |query| format!("{path}?{query}"))
    }

    /// Number of body bytes that will be sent.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }
}

/// A completed exchange: status, headers and the concatenated body chunks.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status as sent by the server
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Every received chunk, in order
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Sends a prepared request and buffers the reply.
///
/// `BotClient` is generic over this trait so tests can stand in a mock for
/// the network. Implementations do not retry and do not treat 4xx/5xx as
/// errors. They honour [`HttpRequest::idle_timeout`] by failing with
/// [`HttpError::Timeout`].
///
/// ```ignore
/// use wire_bot::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Canned(HttpResponse);
///
/// impl HttpClient for Canned {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Performs one exchange.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no complete response could be read: the
    /// connection failed, the transport timed out, the URL was rejected, or
    /// the body exceeded the configured bound.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
