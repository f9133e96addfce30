//! TrueNAS Integration Module
//!
//! This module provides a production-ready, type-safe interface for the
//! TrueNAS storage-appliance REST API (v2.0). It currently covers the
//! pool-dataset resource: creating filesystem datasets and zvols,
//! fetching a dataset with its child tree, listing, and deleting.
//!
//! # Features
//!
//! - **Dataset Operations**: Create, get, list, delete pool datasets
//! - **Typed Models**: ZFS properties exposed with parsed/raw/display
//!   values and their provenance
//! - **Authentication**: API key (Bearer) and HTTP Basic
//! - **Pluggable Transport**: trait-based HTTP layer with a mock
//!   implementation for tests
//!
//! # Example
//!
//! ```no_run
//! use truenas_client::{ApiKeyAuth, TrueNasClient, TrueNasConfig};
//! use truenas_client::types::{DatasetType, PoolDatasetCreate};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TrueNasConfig::builder()
//!     .auth_provider(ApiKeyAuth::from_string("1-mykey"))
//!     .base_url("https://nas.local/api/v2.0")
//!     .build()?;
//!
//! let client = TrueNasClient::new(config)?;
//!
//! // Create a filesystem dataset
//! let body = PoolDatasetCreate::new("tank/data", DatasetType::Filesystem);
//! let dataset = client.pool_datasets().create(&body).await?;
//!
//! // Walk the dataset tree
//! let root = client.pool_datasets().get("tank").await?;
//! for child in root.children.unwrap_or_default() {
//!     println!("{}", child.id.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod mocks;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use auth::{ApiKeyAuth, AuthProvider, BasicAuth};
pub use client::{TrueNasClient, TrueNasClientBuilder};
pub use config::{TrueNasConfig, TrueNasConfigBuilder};
pub use errors::{TrueNasError, TrueNasResult};
pub use types::{ListOptions, PoolDataset, PoolDatasetCreate};

/// Prelude module with commonly used types and traits.
///
/// ```no_run
/// use truenas_client::prelude::*;
/// ```
pub mod prelude {
    // Client
    pub use crate::client::TrueNasClient;

    // Configuration
    pub use crate::config::{TrueNasConfig, TrueNasConfigBuilder};

    // Authentication
    pub use crate::auth::{ApiKeyAuth, AuthProvider, BasicAuth};

    // Services
    pub use crate::services::PoolDatasetService;

    // Common types
    pub use crate::types::{
        DatasetType, EncryptionOptions, ListOptions, PoolDataset, PoolDatasetCreate,
        PropertySource, PropertyValue,
    };

    // Errors
    pub use crate::errors::{TrueNasError, TrueNasResult};
}
