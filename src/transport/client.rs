//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` that implements [`HttpClient`].
/// Redirects are followed transparently (reqwest's default policy) and the
/// response body is read chunk by chunk so an optional size bound can be
/// enforced before the whole body is buffered. The request's idle timeout
/// applies separately to the response head and to every chunk.
///
/// # Example
///
/// ```no_run
/// use wire_bot::transport::{ReqwestClient, HttpClient, HttpRequest};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://prod-nginz-https.wire.com/bot/client")?;
/// let response = client.request(HttpRequest::new(http::Method::GET, url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    max_body_bytes: Option<usize>,
}

impl ReqwestClient {
    /// Creates a new HTTP client with default configuration and no body limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
            max_body_bytes: None,
        }
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (proxies, TLS roots, etc.).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self {
            inner: client,
            max_body_bytes: None,
        }
    }

    /// Bounds the size of buffered response bodies.
    ///
    /// `None` means unbounded.
    #[must_use]
    pub const fn with_max_body_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Returns the configured body size limit.
    #[must_use]
    pub const fn max_body_bytes(&self) -> Option<usize> {
        self.max_body_bytes
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}

/// Awaits one step of the exchange, giving up if it stays silent for `idle`.
///
/// Dropping `step` on timeout closes the connection.
async fn within<T, F>(idle: Option<Duration>, step: F) -> Result<T, HttpError>
where
    F: std::future::Future<Output = Result<T, reqwest::Error>>,
{
    let outcome = match idle {
        Some(limit) => tokio::time::timeout(limit, step)
            .await
            .map_err(|_| HttpError::Timeout)?,
        None => step.await,
    };
    outcome.map_err(map_reqwest_error)
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let idle = req.idle_timeout;
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let mut response = within(idle, builder.send()).await?;

        let status = response.status();
        let headers = response.headers().clone();

        let mut body = Vec::new();
        while let Some(chunk) = within(idle, response.chunk()).await? {
            tracing::debug!("Received {} bytes", chunk.len());
            if let Some(limit) = self.max_body_bytes {
                if body.len() + chunk.len() > limit {
                    return Err(HttpError::ResponseTooLarge { limit });
                }
            }
            body.extend_from_slice(&chunk);
        }

        Ok(HttpResponse::new(status, headers, body))
    }
}
