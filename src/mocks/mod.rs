//! Mock implementations for testing.
//!
//! Provides a mock transport so the client can be exercised in isolation,
//! without a TrueNAS appliance on the network.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::errors::TransportError;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// Mock HTTP transport for testing.
///
/// Tests enqueue responses and verify captured requests in a controlled
/// manner.
///
/// # Example
///
/// ```
/// use truenas_client::mocks::MockHttpTransport;
///
/// let transport = MockHttpTransport::new();
/// transport.enqueue_json_response(200, r#"{"id": "tank"}"#);
/// ```
pub struct MockHttpTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockHttpTransport {
    /// Create a new mock HTTP transport.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Enqueue a response to be returned by the next request.
    pub fn enqueue_response(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Enqueue a JSON response with the given status code and body.
    pub fn enqueue_json_response(&self, status: u16, body: &str) {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        self.enqueue_response(Ok(HttpResponse {
            status: StatusCode::from_u16(status).expect("invalid status code in test"),
            headers,
            body: Bytes::from(body.to_string()),
        }));
    }

    /// Enqueue an error response.
    pub fn enqueue_error(&self, error: TransportError) {
        self.enqueue_response(Err(error));
    }

    /// Get all requests that were made.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the last request that was made.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Verify that exactly `expected` requests were made.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = self.requests.lock().unwrap().len();
        assert_eq!(
            actual, expected,
            "Expected {} requests, got {}",
            expected, actual
        );
    }

    /// Verify the method and URL of the request at `index`.
    ///
    /// The URL assertion matches on substring so tests can ignore the
    /// scheme and host.
    pub fn verify_request(&self, index: usize, method: HttpMethod, url_contains: &str) {
        let requests = self.requests.lock().unwrap();
        assert!(index < requests.len(), "No request at index {}", index);

        let request = &requests[index];
        assert_eq!(
            request.method, method,
            "Expected method {:?}, got {:?}",
            method, request.method
        );
        assert!(
            request.url.as_str().contains(url_contains),
            "Expected URL to contain '{}', got '{}'",
            url_contains,
            request.url
        );
    }

    /// Verify that the request at `index` carries a header value.
    pub fn verify_header(&self, index: usize, header_name: &str, header_value: &str) {
        let requests = self.requests.lock().unwrap();
        assert!(index < requests.len(), "No request at index {}", index);

        let actual = requests[index]
            .headers
            .get(header_name)
            .and_then(|v| v.to_str().ok());
        assert_eq!(
            actual,
            Some(header_value),
            "Expected header '{}' to be '{}', got {:?}",
            header_name,
            header_value,
            actual
        );
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Network(
                    "No response configured in MockHttpTransport".to_string(),
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn request(method: HttpMethod, url: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: Url::parse(url).unwrap(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    #[tokio::test]
    async fn test_mock_transport_basic() {
        let transport = MockHttpTransport::new();
        transport.enqueue_json_response(200, r#"{"status": "ok"}"#);

        let response = transport
            .send(request(HttpMethod::Get, "https://nas.local/api/v2.0/pool/dataset"))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        transport.verify_request_count(1);
        transport.verify_request(0, HttpMethod::Get, "/pool/dataset");
    }

    #[tokio::test]
    async fn test_mock_transport_multiple_responses() {
        let transport = MockHttpTransport::new();
        transport.enqueue_json_response(200, r#"{"id": "a"}"#);
        transport.enqueue_json_response(201, r#"{"id": "b"}"#);

        let first = transport
            .send(request(HttpMethod::Post, "https://nas.local/1"))
            .await
            .unwrap();
        let second = transport
            .send(request(HttpMethod::Post, "https://nas.local/2"))
            .await
            .unwrap();

        assert_eq!(first.status, StatusCode::OK);
        assert_eq!(second.status, StatusCode::CREATED);
        transport.verify_request_count(2);
    }

    #[tokio::test]
    async fn test_mock_transport_error() {
        let transport = MockHttpTransport::new();
        transport.enqueue_error(TransportError::Network("connection refused".to_string()));

        let result = transport
            .send(request(HttpMethod::Get, "https://nas.local/"))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_transport_exhausted_queue_errors() {
        let transport = MockHttpTransport::new();

        let result = transport
            .send(request(HttpMethod::Get, "https://nas.local/"))
            .await;

        assert!(matches!(result, Err(TransportError::Network(_))));
    }
}
