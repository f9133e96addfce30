//! Authentication module for the TrueNAS client.
//!
//! Provides authentication providers for API key and HTTP Basic
//! authentication with secure credential handling.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use crate::errors::AuthenticationError;

/// Authentication provider trait.
///
/// Implementations of this trait supply credentials for API requests.
pub trait AuthProvider: Send + Sync {
    /// Apply authentication to request headers.
    fn apply_auth(&self, headers: &mut HeaderMap) -> Result<(), AuthenticationError>;

    /// Get the authentication scheme name.
    fn scheme(&self) -> &str;

    /// Validate the credentials.
    fn validate(&self) -> Result<(), AuthenticationError>;
}

/// API key authentication provider.
///
/// Uses Bearer token authentication with a TrueNAS API key, as issued
/// under Settings > API Keys on the appliance.
pub struct ApiKeyAuth {
    api_key: SecretString,
}

impl ApiKeyAuth {
    /// Creates a new API key authentication provider.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Creates from a string API key.
    pub fn from_string(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }

    /// Gets a hint of the API key for debugging (last 4 characters).
    pub fn key_hint(&self) -> String {
        let key = self.api_key.expose_secret();
        if key.len() > 4 {
            format!("...{}", &key[key.len() - 4..])
        } else {
            "****".to_string()
        }
    }
}

impl AuthProvider for ApiKeyAuth {
    fn apply_auth(&self, headers: &mut HeaderMap) -> Result<(), AuthenticationError> {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose_secret()))
                .map_err(|e| AuthenticationError::InvalidHeader(e.to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    fn scheme(&self) -> &str {
        "Bearer"
    }

    fn validate(&self) -> Result<(), AuthenticationError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(AuthenticationError::InvalidCredentials(
                "API key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("api_key", &"[REDACTED]")
            .field("key_hint", &self.key_hint())
            .finish()
    }
}

/// HTTP Basic authentication provider.
///
/// The TrueNAS API also accepts the appliance's local credentials
/// (typically `root`) over HTTP Basic.
pub struct BasicAuth {
    username: String,
    password: SecretString,
}

impl BasicAuth {
    /// Creates a new Basic authentication provider.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Creates from plain strings.
    pub fn from_strings(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }
}

impl AuthProvider for BasicAuth {
    fn apply_auth(&self, headers: &mut HeaderMap) -> Result<(), AuthenticationError> {
        let credentials = BASE64.encode(format!(
            "{}:{}",
            self.username,
            self.password.expose_secret()
        ));
        let mut value = HeaderValue::from_str(&format!("Basic {}", credentials))
            .map_err(|e| AuthenticationError::InvalidHeader(e.to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    fn scheme(&self) -> &str {
        "Basic"
    }

    fn validate(&self) -> Result<(), AuthenticationError> {
        if self.username.is_empty() {
            return Err(AuthenticationError::InvalidCredentials(
                "Username cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
