//! Error types for the TrueNAS integration.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for TrueNAS operations.
pub type TrueNasResult<T> = Result<T, TrueNasError>;

/// Top-level error type for the TrueNAS integration.
#[derive(Debug, Error)]
pub enum TrueNasError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Authentication error.
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// Request construction error (fails before any I/O).
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Error reported by the TrueNAS API (non-success status).
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Response handling error.
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),
}

impl TrueNasError {
    /// Creates a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        TrueNasError::Configuration(ConfigurationError::InvalidConfiguration(msg.into()))
    }

    /// Creates a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        TrueNasError::Request(RequestError::ValidationError(msg.into()))
    }

    /// Creates a deserialization error.
    pub fn deserialization(msg: impl Into<String>) -> Self {
        TrueNasError::Response(ResponseError::DeserializationError(msg.into()))
    }

    /// Returns the HTTP status code if the server reported one.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            TrueNasError::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// Returns true if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns the raw response body for server-reported errors.
    ///
    /// The body is passed through uninterpreted so callers can inspect
    /// whatever the appliance returned (message objects, validation maps).
    pub fn response_body(&self) -> Option<&str> {
        match self {
            TrueNasError::Api(err) => Some(&err.body),
            _ => None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Missing credentials.
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// Invalid credentials.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Credentials cannot be encoded into a request header.
    #[error("Invalid auth header: {0}")]
    InvalidHeader(String),
}

/// Request construction errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid query options.
    #[error("Invalid query options: {0}")]
    InvalidQuery(String),

    /// Body serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Error reported by the TrueNAS API.
///
/// The client performs no classification beyond capturing the status code;
/// the raw response body is retained verbatim for caller inspection.
#[derive(Debug, Error)]
#[error("HTTP {status}: {message}")]
pub struct ApiError {
    /// HTTP status code returned by the server.
    pub status: StatusCode,
    /// Human-readable message, extracted from the error payload when the
    /// server sent one, otherwise derived from the status line.
    pub message: String,
    /// Raw response body, uninterpreted.
    pub body: String,
}

impl ApiError {
    /// Returns true for not-found-class responses.
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }
}

/// Network errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Timeout.
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Response errors.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// Unexpected format.
    #[error("Unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout error.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// HTTP error.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Network(err.to_string())
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

impl From<TransportError> for TrueNasError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout(msg) => TrueNasError::Network(NetworkError::Timeout(msg)),
            TransportError::Network(msg) => {
                TrueNasError::Network(NetworkError::ConnectionFailed(msg))
            }
            TransportError::Http(msg) => {
                TrueNasError::Response(ResponseError::UnexpectedFormat(msg))
            }
        }
    }
}
