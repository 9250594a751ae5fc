//! Request and response payload types.

use serde::Serialize;

use super::BotError;
use crate::transport::HttpResponse;

/// Body of an outgoing request.
///
/// Raw bytes are sent as-is, JSON values are serialized to text, and
/// [`Payload::Empty`] sends no body at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    /// No request body.
    #[default]
    Empty,
    /// Raw bytes, sent unmodified.
    Bytes(Vec<u8>),
    /// A JSON value, serialized on send.
    Json(serde_json::Value),
}

impl Payload {
    /// Builds a JSON payload from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Serialize`] if the value cannot be represented as JSON
    /// (e.g. a map with non-string keys).
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, BotError> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(BotError::Serialize)
    }

    /// Encodes the payload into request body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Serialize`] if JSON encoding fails.
    pub fn into_body(self) -> Result<Option<Vec<u8>>, BotError> {
        match self {
            Self::Empty => Ok(None),
            Self::Bytes(bytes) => Ok(Some(bytes)),
            Self::Json(value) => serde_json::to_vec(&value)
                .map(Some)
                .map_err(BotError::Serialize),
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// A completed API call: the HTTP status plus the decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// HTTP status returned by the server
    pub status: http::StatusCode,
    /// Decoded response body
    pub body: T,
}

impl<T> ApiResponse<T> {
    /// Creates a new response.
    #[must_use]
    pub const fn new(status: http::StatusCode, body: T) -> Self {
        Self { status, body }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl ApiResponse<Vec<u8>> {
    /// Wraps the raw body of a transport response.
    #[must_use]
    pub fn raw(response: HttpResponse) -> Self {
        Self::new(response.status, response.body)
    }
}

impl ApiResponse<serde_json::Value> {
    /// Parses the body of a transport response as JSON.
    ///
    /// An empty (or whitespace-only) body decodes to `null`; error responses
    /// from the server frequently carry no body.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::MalformedResponse`] if the body is not valid JSON.
    pub fn json(response: HttpResponse) -> Result<Self, BotError> {
        let status = response.status;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new(status, serde_json::Value::Null));
        }

        serde_json::from_slice(&response.body)
            .map(|body| Self::new(status, body))
            .map_err(|source| BotError::MalformedResponse { status, source })
    }
}

/// The callback-surface view of a finished request.
///
/// `status == 0` with `body == None` signals a transport failure (error or
/// timeout) rather than an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Full response body, `None` on transport failure
    pub body: Option<Vec<u8>>,
    /// HTTP status code, `0` on transport failure
    pub status: u16,
}

impl Reply {
    /// Status reported when no HTTP response was received.
    pub const FAILED_STATUS: u16 = 0;

    /// A reply carrying a received response.
    #[must_use]
    pub fn received(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self {
            body: Some(body),
            status: status.as_u16(),
        }
    }

    /// The sentinel reply for transport failures: `(None, 0)`.
    #[must_use]
    pub const fn failed() -> Self {
        Self {
            body: None,
            status: Self::FAILED_STATUS,
        }
    }

    /// Returns true if this reply signals a transport failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.status == Self::FAILED_STATUS
    }
}

impl From<Result<HttpResponse, BotError>> for Reply {
    fn from(result: Result<HttpResponse, BotError>) -> Self {
        match result {
            Ok(response) => Self::received(response.status, response.body),
            Err(_) => Self::failed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: http::StatusCode, body: &[u8]) -> HttpResponse {
        HttpResponse::new(status, http::HeaderMap::new(), body.to_vec())
    }

    mod payload {
        use super::*;

        #[test]
        fn empty_has_no_body() {
            assert_eq!(Payload::Empty.into_body().unwrap(), None);
        }

        #[test]
        fn bytes_are_sent_unmodified() {
            let raw = vec![0x00, 0xFF, b'{'];

            assert_eq!(Payload::from(raw.clone()).into_body().unwrap(), Some(raw));
        }

        #[test]
        fn json_is_serialized_to_text() {
            let payload = Payload::json(&json!({"recipients": {}})).unwrap();

            assert_eq!(
                payload.into_body().unwrap(),
                Some(br#"{"recipients":{}}"#.to_vec())
            );
        }

        #[test]
        fn json_rejects_non_string_map_keys() {
            let mut map = std::collections::BTreeMap::new();
            map.insert(vec![1u8], "value");

            assert!(matches!(Payload::json(&map), Err(BotError::Serialize(_))));
        }

        #[test]
        fn default_is_empty() {
            assert_eq!(Payload::default(), Payload::Empty);
        }
    }

    mod api_response {
        use super::*;

        #[test]
        fn json_parses_body() {
            let parsed =
                ApiResponse::json(response(http::StatusCode::OK, br#"{"ok": true}"#)).unwrap();

            assert_eq!(parsed.status, http::StatusCode::OK);
            assert_eq!(parsed.body, json!({"ok": true}));
            assert!(parsed.is_success());
        }

        #[test]
        fn json_treats_empty_body_as_null() {
            let parsed = ApiResponse::json(response(http::StatusCode::NOT_FOUND, b"  \n")).unwrap();

            assert_eq!(parsed.body, serde_json::Value::Null);
            assert!(!parsed.is_success());
        }

        #[test]
        fn json_reports_malformed_body() {
            let result = ApiResponse::json(response(http::StatusCode::BAD_GATEWAY, b"<html>"));

            match result {
                Err(BotError::MalformedResponse { status, .. }) => {
                    assert_eq!(status, http::StatusCode::BAD_GATEWAY);
                }
                other => panic!("Expected MalformedResponse, got {other:?}"),
            }
        }

        #[test]
        fn raw_keeps_bytes() {
            let raw = ApiResponse::raw(response(http::StatusCode::OK, &[1, 2, 3]));

            assert_eq!(raw.body, vec![1, 2, 3]);
        }
    }

    mod reply {
        use super::*;

        #[test]
        fn failed_is_none_and_zero() {
            let reply = Reply::failed();

            assert_eq!(reply.body, None);
            assert_eq!(reply.status, 0);
            assert!(reply.is_failure());
        }

        #[test]
        fn from_ok_carries_status_and_body() {
            let reply = Reply::from(Ok(response(http::StatusCode::CREATED, b"abc")));

            assert_eq!(reply, Reply::received(http::StatusCode::CREATED, b"abc".to_vec()));
            assert_eq!(reply.status, 201);
            assert!(!reply.is_failure());
        }

        #[test]
        fn from_err_is_failed() {
            let reply = Reply::from(Err(BotError::from(crate::transport::HttpError::Timeout)));

            assert_eq!(reply, Reply::failed());
        }
    }
}
