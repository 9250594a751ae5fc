//! Tests for request/response values and `HttpError`.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

fn bot_url(path: &str) -> url::Url {
    url::Url::parse("https://prod-nginz-https.wire.com")
        .unwrap()
        .join(path)
        .unwrap()
}

fn response(status: http::StatusCode) -> HttpResponse {
    HttpResponse::new(status, http::HeaderMap::new(), vec![])
}

mod http_request {
    use super::*;

    #[test]
    fn new_starts_without_headers_or_body() {
        let url = bot_url("/bot/client");
        let req = HttpRequest::new(http::Method::GET, url.clone());

        assert_eq!(req.method, http::Method::GET);
        assert_eq!(req.url, url);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
        assert_eq!(req.body_len(), 0);
    }

    #[test]
    fn body_len_counts_encoded_bytes() {
        let mut req = HttpRequest::new(http::Method::POST, bot_url("/bot/assets"));
        req.body = Some(b"--frontier--".to_vec());

        assert_eq!(req.body_len(), 12);
    }

    #[test]
    fn path_and_query_keeps_flag() {
        let req = HttpRequest::new(
            http::Method::POST,
            bot_url("/bot/messages?ignore_missing=true"),
        );

        assert_eq!(req.path_and_query(), "/bot/messages?ignore_missing=true");
    }

    #[test]
    fn path_and_query_without_query() {
        let req = HttpRequest::new(http::Method::GET, bot_url("/bot/assets/abc123"));

        assert_eq!(req.path_and_query(), "/bot/assets/abc123");
    }
}

mod http_response {
    use super::*;

    #[test]
    fn new_keeps_parts() {
        let mut headers = http::HeaderMap::new();
        headers.insert("content-type", http::HeaderValue::from_static("application/json"));

        let resp = HttpResponse::new(http::StatusCode::OK, headers, b"{}".to_vec());

        assert_eq!(resp.status, http::StatusCode::OK);
        assert_eq!(resp.headers.get("content-type").unwrap(), "application/json");
        assert_eq!(resp.body, b"{}".to_vec());
    }

    #[test]
    fn is_success_follows_status_class() {
        assert!(response(http::StatusCode::CREATED).is_success());
        assert!(!response(http::StatusCode::PRECONDITION_FAILED).is_success());
        assert!(!response(http::StatusCode::BAD_GATEWAY).is_success());
    }
}

mod http_error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_preserves_source() {
        let error = HttpError::Connection(Box::new(std::io::Error::other("connection refused")));

        assert!(error.to_string().contains("Connection error"));
        assert!(
            error
                .source()
                .unwrap()
                .to_string()
                .contains("connection refused")
        );
    }

    #[test]
    fn timeout_displays_message() {
        let error = HttpError::Timeout;

        assert_eq!(error.to_string(), "Request timed out");
        assert!(error.is_timeout());
        assert!(error.source().is_none());
    }

    #[test]
    fn response_too_large_names_limit() {
        let error = HttpError::ResponseTooLarge { limit: 4096 };

        assert_eq!(error.to_string(), "Response body exceeded 4096 bytes");
        assert!(!error.is_timeout());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpError>();
    }
}

mod http_client_trait {
    use super::*;

    struct Canned(HttpResponse);

    impl HttpClient for Canned {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn implementations_can_be_used_generically() {
        async fn status_of<C: HttpClient>(client: &C) -> http::StatusCode {
            client
                .request(HttpRequest::new(http::Method::GET, bot_url("/bot/client")))
                .await
                .unwrap()
                .status
        }

        let client = Canned(response(http::StatusCode::ACCEPTED));

        assert_eq!(status_of(&client).await, http::StatusCode::ACCEPTED);
    }
}
