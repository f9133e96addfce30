//! Configuration for the TrueNAS client.

use crate::auth::AuthProvider;
use crate::errors::{ConfigurationError, TrueNasError, TrueNasResult};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Configuration for the TrueNAS client.
#[derive(Clone)]
pub struct TrueNasConfig {
    /// Authentication provider.
    pub auth_provider: Arc<dyn AuthProvider>,

    /// Base URL for the API, e.g. `https://nas.local/api/v2.0/`.
    ///
    /// Always carries a trailing slash so relative paths join under it.
    pub base_url: Url,

    /// Default timeout for requests.
    pub timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// User agent string.
    pub user_agent: String,

    /// Accept self-signed TLS certificates.
    ///
    /// Appliances on a LAN commonly serve the API behind a certificate
    /// that no public CA has signed.
    pub accept_invalid_certs: bool,
}

impl TrueNasConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> TrueNasConfigBuilder {
        TrueNasConfigBuilder::new()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> TrueNasResult<()> {
        match self.base_url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(TrueNasError::Configuration(
                    ConfigurationError::InvalidConfiguration(format!(
                        "Base URL scheme must be http or https, got {}",
                        other
                    )),
                ));
            }
        }

        if self.base_url.host_str().is_none() {
            return Err(TrueNasError::Configuration(
                ConfigurationError::InvalidConfiguration(
                    "Base URL must include a host".to_string(),
                ),
            ));
        }

        self.auth_provider
            .validate()
            .map_err(TrueNasError::Authentication)?;

        Ok(())
    }
}

impl std::fmt::Debug for TrueNasConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueNasConfig")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

/// Builder for [`TrueNasConfig`].
pub struct TrueNasConfigBuilder {
    auth_provider: Option<Arc<dyn AuthProvider>>,
    base_url: Option<String>,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
    accept_invalid_certs: bool,
}

impl TrueNasConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            auth_provider: None,
            base_url: None,
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: None,
            accept_invalid_certs: false,
        }
    }

    /// Sets the authentication provider.
    pub fn auth_provider<A: AuthProvider + 'static>(mut self, provider: A) -> Self {
        self.auth_provider = Some(Arc::new(provider));
        self
    }

    /// Sets the authentication provider from an Arc.
    pub fn auth_provider_arc(mut self, provider: Arc<dyn AuthProvider>) -> Self {
        self.auth_provider = Some(provider);
        self
    }

    /// Sets the base URL of the API, e.g. `https://nas.local/api/v2.0`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Accept self-signed TLS certificates.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> TrueNasResult<TrueNasConfig> {
        let auth_provider = self.auth_provider.ok_or_else(|| {
            TrueNasError::Configuration(ConfigurationError::MissingCredentials(
                "Authentication provider is required".to_string(),
            ))
        })?;

        let raw_url = self.base_url.ok_or_else(|| {
            TrueNasError::Configuration(ConfigurationError::InvalidConfiguration(
                "Base URL is required".to_string(),
            ))
        })?;

        // Normalize to a trailing slash so Url::join appends instead of
        // replacing the last path segment.
        let normalized = if raw_url.ends_with('/') {
            raw_url
        } else {
            format!("{}/", raw_url)
        };

        let base_url = Url::parse(&normalized).map_err(|e| {
            TrueNasError::Configuration(ConfigurationError::InvalidConfiguration(format!(
                "Invalid base URL: {}",
                e
            )))
        })?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("truenas-client/{}", env!("CARGO_PKG_VERSION")));

        let config = TrueNasConfig {
            auth_provider,
            base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent,
            accept_invalid_certs: self.accept_invalid_certs,
        };

        config.validate()?;

        Ok(config)
    }
}

impl Default for TrueNasConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
