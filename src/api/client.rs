//! Bot API client: the request primitive and the endpoint presets.

use std::fmt;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use serde::Serialize;
use tokio::task::JoinHandle;
use url::Url;

use super::{ApiResponse, BotError, Completion, Payload, Reply};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestClient};

/// Relative paths of the endpoints this client talks to.
pub mod paths {
    /// Message send endpoint (`POST`, takes `ignore_missing` query flag).
    pub const MESSAGES: &str = "/bot/messages";
    /// Device list of the bot (`GET`).
    pub const CLIENTS: &str = "/bot/client";
    /// Prekey bundles for users and devices (`POST`).
    pub const PREKEYS: &str = "/bot/users/prekeys";
    /// Asset upload (`POST`) and download prefix (`GET /bot/assets/{id}`).
    pub const ASSETS: &str = "/bot/assets";
}

/// Header carrying the access token for an asset download.
pub const ASSET_TOKEN: HeaderName = HeaderName::from_static("asset-token");

/// Content type of an asset upload body.
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/mixed; boundary=frontier";

static DEFAULT_BASE: LazyLock<Url> = LazyLock::new(|| {
    Url::parse(ClientConfig::DEFAULT_BASE_URL).unwrap_or_else(|e| {
        unreachable!("{} is not a URL: {e}", ClientConfig::DEFAULT_BASE_URL)
    })
});

/// Connection settings shared by every request of a [`BotClient`].
///
/// # Defaults
///
/// - `base_url`: `https://prod-nginz-https.wire.com`
/// - `timeout`: 15 seconds
/// - `max_body_bytes`: unbounded
/// - `headers`: none beyond `Authorization` and `Content-Type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root that endpoint paths are appended to. Any path it carries is kept
    /// as a prefix.
    pub base_url: Url,

    /// Longest the exchange may stay silent before it is aborted.
    ///
    /// The clock restarts whenever the connection makes progress (connect,
    /// response head, each body chunk), so a slow but steady download is
    /// not cut off.
    pub timeout: Duration,

    /// Maximum buffered response body size. `None` means unbounded.
    pub max_body_bytes: Option<usize>,

    /// Extra default headers, applied after the built-in ones.
    pub headers: HeaderMap,
}

impl ClientConfig {
    /// Default API host.
    pub const DEFAULT_BASE_URL: &'static str = "https://prod-nginz-https.wire.com";

    /// Default request timeout (15 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE.clone(),
            timeout: Self::DEFAULT_TIMEOUT,
            max_body_bytes: None,
            headers: HeaderMap::new(),
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bounds the buffered response body size.
    #[must_use]
    pub const fn with_max_body_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Sets extra default headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the bot HTTP API.
///
/// Holds the bearer credential and connection settings; both are immutable
/// after construction and shared cheaply between clones, so one client can
/// issue any number of concurrent requests.
///
/// Every request carries `Authorization: Bearer <token>` and
/// `Content-Type: application/json`. Per-request headers override these key
/// by key.
///
/// # Example
///
/// ```no_run
/// use wire_bot::api::BotClient;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), wire_bot::api::BotError> {
/// let client = BotClient::new("bot-token")?;
/// let response = client.send_message(&json!({"recipients": {}}), false).await?;
/// println!("{} {}", response.status, response.body);
/// # Ok(())
/// # }
/// ```
pub struct BotClient<H = ReqwestClient> {
    http: Arc<H>,
    authorization: HeaderValue,
    config: Arc<ClientConfig>,
}

impl BotClient<ReqwestClient> {
    /// Creates a client for the default host with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::InvalidToken`] if the token is not a valid header value.
    pub fn new(token: &str) -> Result<Self, BotError> {
        Self::with_config(token, ClientConfig::default())
    }

    /// Creates a client with custom settings.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::InvalidToken`] if the token is not a valid header value.
    pub fn with_config(token: &str, config: ClientConfig) -> Result<Self, BotError> {
        let http = ReqwestClient::new().with_max_body_bytes(config.max_body_bytes);
        Self::with_http_client(http, token, config)
    }
}

impl<H> BotClient<H> {
    /// Creates a client on top of a custom transport.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::InvalidToken`] if the token is not a valid header value.
    pub fn with_http_client(http: H, token: &str, config: ClientConfig) -> Result<Self, BotError> {
        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(BotError::InvalidToken)?;
        authorization.set_sensitive(true);

        Ok(Self {
            http: Arc::new(http),
            authorization,
            config: Arc::new(config),
        })
    }

    /// Returns the connection settings.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn http_client(&self) -> &H {
        &self.http
    }

    /// Builds the header set for one request.
    ///
    /// Order of precedence (last wins per key): built-in defaults,
    /// configured headers, per-request headers.
    fn merged_headers(&self, additional: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for layer in [&self.config.headers, additional] {
            for name in layer.keys() {
                headers.remove(name);
            }
            for (name, value) in layer {
                headers.append(name, value.clone());
            }
        }

        headers
    }

    /// Resolves an endpoint path below the base URL's own path, so a base
    /// such as `https://proxy/wire` keeps its `/wire` prefix.
    fn endpoint_url(&self, path: &str) -> Result<Url, BotError> {
        let mut base = self.config.base_url.clone();
        if !base.path().ends_with('/') {
            let prefix = format!("{}/", base.path());
            base.set_path(&prefix);
        }

        base.join(path.trim_start_matches('/'))
            .map_err(|e| HttpError::InvalidUrl(format!("{path}: {e}")).into())
    }

    /// Builds the transport request for `method path` with the given body.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved against the base URL
    /// or the payload cannot be serialized.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        additional_headers: &HeaderMap,
    ) -> Result<HttpRequest, BotError> {
        let mut request = HttpRequest::new(method, self.endpoint_url(path)?);
        request.headers = self.merged_headers(additional_headers);
        request.body = payload.into_body()?;
        request.idle_timeout = Some(self.config.timeout);
        Ok(request)
    }
}

impl<H: HttpClient> BotClient<H> {
    /// Sends one request and returns the fully buffered response.
    ///
    /// The request is aborted once the connection stays silent for the
    /// configured timeout. No retries are made. Non-2xx statuses are returned as ordinary responses.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Http`] on transport failure or timeout, or a
    /// request-building error (see [`Self::build_request`]).
    pub async fn send_request(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        additional_headers: &HeaderMap,
    ) -> Result<HttpResponse, BotError> {
        let request = self.build_request(method, path, payload, additional_headers)?;
        self.execute(request).await
    }

    /// Sends a prepared request.
    ///
    /// The transport aborts the exchange once it has been silent for the
    /// request's `idle_timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Http`] on transport failure or timeout.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BotError> {
        let target = format!("{} {}", request.method, request.path_and_query());
        tracing::debug!(
            headers = ?request.headers,
            body_bytes = request.body_len(),
            "Sending {target}"
        );

        match self.http.request(request).await {
            Ok(response) => {
                tracing::debug!("{target} completed with {}", response.status);
                Ok(response)
            }
            Err(HttpError::Timeout) => {
                tracing::warn!(
                    "{target} timed out after {}s without progress",
                    self.config.timeout.as_secs_f64()
                );
                Err(HttpError::Timeout.into())
            }
            Err(e) => {
                tracing::warn!("{target} failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Posts an encrypted message envelope.
    ///
    /// With `ignore_missing` set, the server accepts the message even if some
    /// recipients' devices are not covered by the envelope.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed JSON response.
    pub async fn send_message<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        ignore_missing: bool,
    ) -> Result<ApiResponse<serde_json::Value>, BotError> {
        let path = format!("{}?ignore_missing={ignore_missing}", paths::MESSAGES);
        let response = self
            .send_request(Method::POST, &path, Payload::json(payload)?, &HeaderMap::new())
            .await?;
        ApiResponse::json(response)
    }

    /// Fetches the bot's device list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed JSON response.
    pub async fn get_clients(
        &self,
        payload: Payload,
    ) -> Result<ApiResponse<serde_json::Value>, BotError> {
        let response = self
            .send_request(Method::GET, paths::CLIENTS, payload, &HeaderMap::new())
            .await?;
        ApiResponse::json(response)
    }

    /// Fetches prekey bundles for the given users and devices.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed JSON response.
    pub async fn get_prekeys<T: Serialize + ?Sized>(
        &self,
        users_and_devices: &T,
    ) -> Result<ApiResponse<serde_json::Value>, BotError> {
        let payload = Payload::json(users_and_devices)?;
        tracing::debug!("Fetching prekeys for {payload:?}");
        let response = self
            .send_request(Method::POST, paths::PREKEYS, payload, &HeaderMap::new())
            .await?;
        ApiResponse::json(response)
    }

    /// Downloads an asset's raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::InvalidAssetId`] for IDs that are not a single path
    /// segment, [`BotError::InvalidHeader`] for an unusable token, or a
    /// transport failure.
    pub async fn get_asset(
        &self,
        asset_id: &str,
        asset_token: &str,
    ) -> Result<ApiResponse<Vec<u8>>, BotError> {
        validate_asset_id(asset_id)?;
        tracing::debug!("Fetching asset {asset_id}");

        let mut token =
            HeaderValue::from_str(asset_token).map_err(|e| BotError::InvalidHeader {
                name: ASSET_TOKEN.to_string(),
                reason: e.to_string(),
            })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ASSET_TOKEN, token);

        let path = format!("{}/{asset_id}", paths::ASSETS);
        let response = self
            .send_request(Method::GET, &path, Payload::Empty, &headers)
            .await?;
        Ok(ApiResponse::raw(response))
    }

    /// Uploads a pre-encoded `multipart/mixed` asset body.
    ///
    /// The body must use `frontier` as its boundary. The response carries the
    /// new asset's key and token.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a malformed JSON response.
    pub async fn upload_asset(
        &self,
        data: Vec<u8>,
    ) -> Result<ApiResponse<serde_json::Value>, BotError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(MULTIPART_CONTENT_TYPE),
        );
        headers.insert(CONTENT_LENGTH, HeaderValue::from(data.len()));

        let response = self
            .send_request(Method::POST, paths::ASSETS, Payload::Bytes(data), &headers)
            .await?;
        ApiResponse::json(response)
    }
}

impl<H: HttpClient + 'static> BotClient<H> {
    /// Sends a request in the background and reports through a callback.
    ///
    /// `callback` receives the full body and status, or `(None, 0)` on
    /// transport failure or timeout. It fires exactly once, including when
    /// the returned handle is aborted or the runtime shuts down first; both
    /// report `(None, 0)`. The handle resolves to whether the request itself
    /// delivered the reply.
    ///
    /// Must be called within a tokio runtime.
    pub fn dispatch<F>(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        additional_headers: HeaderMap,
        callback: F,
    ) -> JoinHandle<bool>
    where
        F: FnOnce(Reply) + Send + 'static,
    {
        let client = self.clone();
        let path = path.to_string();
        let completion = Completion::new(callback);

        tokio::spawn(async move {
            let result = client
                .send_request(method, &path, payload, &additional_headers)
                .await;
            completion.complete(Reply::from(result))
        })
    }
}

impl<H> Clone for BotClient<H> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            authorization: self.authorization.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H> fmt::Debug for BotClient<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotClient")
            .field("base_url", &self.config.base_url.as_str())
            .field("timeout", &self.config.timeout)
            .field("authorization", &self.authorization)
            .finish_non_exhaustive()
    }
}

fn validate_asset_id(asset_id: &str) -> Result<(), BotError> {
    let valid = !asset_id.is_empty()
        && asset_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        && asset_id != "."
        && asset_id != "..";

    if valid {
        Ok(())
    } else {
        Err(BotError::InvalidAssetId(asset_id.to_string()))
    }
}
