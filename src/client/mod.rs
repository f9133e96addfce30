//! TrueNAS API client implementation.

use crate::auth::AuthProvider;
use crate::config::{TrueNasConfig, TrueNasConfigBuilder};
use crate::errors::{TrueNasError, TrueNasResult};
use crate::services::PoolDatasetService;
use crate::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;

mod executor;
pub use executor::RequestExecutor;

/// TrueNAS API client.
///
/// This is the main entry point for interacting with the TrueNAS REST
/// API. It provides access to the service modules and handles
/// authentication and transport.
///
/// The client holds no mutable state and is safe for concurrent use.
pub struct TrueNasClient {
    config: TrueNasConfig,
    executor: Arc<RequestExecutor>,
}

impl TrueNasClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use truenas_client::{ApiKeyAuth, TrueNasClient, TrueNasConfig};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = TrueNasConfig::builder()
    ///     .auth_provider(ApiKeyAuth::from_string("1-mykey"))
    ///     .base_url("https://nas.local/api/v2.0")
    ///     .build()?;
    ///
    /// let client = TrueNasClient::new(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: TrueNasConfig) -> TrueNasResult<Self> {
        let transport = Arc::new(ReqwestTransport::from_config(&config).map_err(|e| {
            TrueNasError::configuration(format!("Failed to create transport: {}", e))
        })?);

        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client with a caller-supplied transport.
    ///
    /// Retry, pooling, and any other wire policy live in the transport;
    /// tests substitute a mock here.
    pub fn with_transport(config: TrueNasConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let executor = Arc::new(RequestExecutor::new(config.clone(), transport));
        Self { config, executor }
    }

    /// Creates a new client builder.
    pub fn builder() -> TrueNasClientBuilder {
        TrueNasClientBuilder::new()
    }

    /// Access the pool-dataset service.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use truenas_client::TrueNasClient;
    /// # async fn example(client: TrueNasClient) -> Result<(), Box<dyn std::error::Error>> {
    /// let datasets = client.pool_datasets().list(None).await?;
    /// for dataset in datasets {
    ///     println!("{}", dataset.id.unwrap_or_default());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn pool_datasets(&self) -> PoolDatasetService {
        PoolDatasetService::new(self.executor.clone())
    }

    /// Gets the base URL for the API.
    pub fn base_url(&self) -> &str {
        self.config.base_url.as_str()
    }

    /// Gets the configuration.
    pub fn config(&self) -> &TrueNasConfig {
        &self.config
    }

    /// Gets the request executor (for advanced use cases).
    pub fn executor(&self) -> &Arc<RequestExecutor> {
        &self.executor
    }
}

impl std::fmt::Debug for TrueNasClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueNasClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`TrueNasClient`].
///
/// Provides a fluent API for constructing a client with custom
/// configuration.
pub struct TrueNasClientBuilder {
    config_builder: TrueNasConfigBuilder,
}

impl TrueNasClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: TrueNasConfig::builder(),
        }
    }

    /// Sets the authentication provider.
    pub fn auth_provider<A: AuthProvider + 'static>(mut self, provider: A) -> Self {
        self.config_builder = self.config_builder.auth_provider(provider);
        self
    }

    /// Sets the authentication provider from an Arc.
    pub fn auth_provider_arc(mut self, provider: Arc<dyn AuthProvider>) -> Self {
        self.config_builder = self.config_builder.auth_provider_arc(provider);
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.connect_timeout(timeout);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Accept self-signed TLS certificates.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config_builder = self.config_builder.accept_invalid_certs(accept);
        self
    }

    /// Builds the client.
    pub fn build(self) -> TrueNasResult<TrueNasClient> {
        let config = self.config_builder.build()?;
        TrueNasClient::new(config)
    }
}

impl Default for TrueNasClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiKeyAuth;

    #[test]
    fn test_client_builder() {
        let result = TrueNasClient::builder()
            .auth_provider(ApiKeyAuth::from_string("1-testkey"))
            .base_url("https://nas.local/api/v2.0")
            .timeout(std::time::Duration::from_secs(30))
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn test_client_builder_requires_base_url() {
        let result = TrueNasClient::builder()
            .auth_provider(ApiKeyAuth::from_string("1-testkey"))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_client_base_url_accessor() {
        let client = TrueNasClient::builder()
            .auth_provider(ApiKeyAuth::from_string("1-testkey"))
            .base_url("https://nas.local/api/v2.0")
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://nas.local/api/v2.0/");
    }
}
