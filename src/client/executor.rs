//! Request executor: request construction, dispatch, and error mapping.

use crate::config::TrueNasConfig;
use crate::errors::{
    ApiError, RequestError, ResponseError, TrueNasError, TrueNasResult,
};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Executes API requests on behalf of the services.
///
/// Mirrors the two-step collaborator contract of the original client
/// (`build_request` then `dispatch`): build a request with auth and
/// standard headers applied, send it through the transport, surface
/// non-success responses as [`ApiError`] with the raw body retained.
pub struct RequestExecutor {
    config: TrueNasConfig,
    transport: Arc<dyn HttpTransport>,
}

impl RequestExecutor {
    /// Creates a new request executor.
    pub fn new(config: TrueNasConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Executes a request and deserializes the JSON response.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Bytes>,
    ) -> TrueNasResult<T> {
        let response = self.dispatch(self.build_request(method, path, body)?).await?;

        serde_json::from_slice(&response.body).map_err(|e| {
            TrueNasError::Response(ResponseError::DeserializationError(format!(
                "Failed to deserialize response: {}",
                e
            )))
        })
    }

    /// Executes a request and discards any response body.
    pub async fn execute_empty(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Bytes>,
    ) -> TrueNasResult<()> {
        self.dispatch(self.build_request(method, path, body)?)
            .await?;
        Ok(())
    }

    /// Builds a request against the configured base URL.
    ///
    /// Fails before any network I/O on invalid paths or credentials that
    /// cannot be encoded into headers.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Bytes>,
    ) -> TrueNasResult<HttpRequest> {
        let url = self.build_url(path)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.config.user_agent).map_err(|e| {
                TrueNasError::Request(RequestError::ValidationError(format!(
                    "Invalid user agent: {}",
                    e
                )))
            })?,
        );

        self.config
            .auth_provider
            .apply_auth(&mut headers)
            .map_err(TrueNasError::Authentication)?;

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
            timeout: Some(self.config.timeout),
        })
    }

    /// Sends a built request and checks the response status.
    pub async fn dispatch(&self, request: HttpRequest) -> TrueNasResult<HttpResponse> {
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(?method, url = %url, "Sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(?method, url = %url, error = %e, "Transport failure");
            TrueNasError::from(e)
        })?;

        tracing::debug!(?method, url = %url, status = %response.status, "Received response");

        if !response.status.is_success() {
            return Err(TrueNasError::Api(Self::error_from_response(response)));
        }

        Ok(response)
    }

    /// Builds a full URL from a path, preserving any embedded query string.
    pub fn build_url(&self, path: &str) -> TrueNasResult<Url> {
        let path = path.trim_start_matches('/');

        // The base URL is normalized to a trailing slash at config build
        // time, so join appends under it.
        self.config.base_url.join(path).map_err(|e| {
            TrueNasError::Request(RequestError::InvalidUrl(format!(
                "Invalid path {}: {}",
                path, e
            )))
        })
    }

    /// Maps a non-success response to an [`ApiError`].
    ///
    /// The body is kept verbatim; a `message` field is lifted out of the
    /// usual TrueNAS error payload when one is present, purely as a
    /// convenience for display.
    fn error_from_response(response: HttpResponse) -> ApiError {
        #[derive(serde::Deserialize)]
        struct ErrorPayload {
            message: String,
        }

        let body = String::from_utf8_lossy(&response.body).into_owned();

        let message = serde_json::from_slice::<ErrorPayload>(&response.body)
            .map(|payload| payload.message)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    format!("HTTP {}", response.status)
                } else {
                    body.clone()
                }
            });

        ApiError {
            status: response.status,
            message,
            body,
        }
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("config", &self.config)
            .finish()
    }
}
