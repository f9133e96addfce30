//! Pool-dataset service.
//!
//! Covers the `/pool/dataset` resource: creating filesystem datasets and
//! zvols, fetching one dataset (with its child tree), listing, and
//! deleting.

use crate::client::RequestExecutor;
use crate::errors::{RequestError, TrueNasError, TrueNasResult};
use crate::transport::HttpMethod;
use crate::types::{ListOptions, PoolDataset, PoolDatasetCreate};
use bytes::Bytes;
use std::sync::Arc;
use tracing::instrument;

const POOL_DATASET_PATH: &str = "/pool/dataset";

/// Service for pool-dataset operations.
///
/// All policy beyond request shaping (retries, timeouts, caching) is the
/// transport's concern; server-side errors pass through unmodified.
pub struct PoolDatasetService {
    executor: Arc<RequestExecutor>,
}

impl PoolDatasetService {
    /// Creates a new pool-dataset service.
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Creates a dataset or zvol.
    ///
    /// The server requires `name` and `type`; nothing is validated
    /// locally. Not idempotent: creating the same name twice fails
    /// server-side.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use truenas_client::TrueNasClient;
    /// use truenas_client::types::{DatasetType, PoolDatasetCreate};
    ///
    /// # async fn example(client: TrueNasClient) -> Result<(), Box<dyn std::error::Error>> {
    /// let body = PoolDatasetCreate {
    ///     compression: Some("LZ4".to_string()),
    ///     ..PoolDatasetCreate::new("tank/data", DatasetType::Filesystem)
    /// };
    /// let dataset = client.pool_datasets().create(&body).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, body), fields(name = body.name.as_deref()))]
    pub async fn create(&self, body: &PoolDatasetCreate) -> TrueNasResult<PoolDataset> {
        let payload = serde_json::to_vec(body).map_err(|e| {
            TrueNasError::Request(RequestError::SerializationError(format!(
                "Failed to serialize request: {}",
                e
            )))
        })?;

        self.executor
            .execute(
                HttpMethod::Post,
                POOL_DATASET_PATH,
                Some(Bytes::from(payload)),
            )
            .await
    }

    /// Gets a single dataset by its path-like id, e.g. `tank/data`.
    ///
    /// The response may carry the dataset's whole child tree.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> TrueNasResult<PoolDataset> {
        let path = format!("{}/id/{}", POOL_DATASET_PATH, id);
        self.executor.execute(HttpMethod::Get, &path, None).await
    }

    /// Lists datasets, optionally filtered and paginated.
    ///
    /// With `None`, no query string is sent. Malformed options fail
    /// before any request goes out.
    #[instrument(skip(self, opt))]
    pub async fn list(&self, opt: Option<&ListOptions>) -> TrueNasResult<Vec<PoolDataset>> {
        let path = match opt {
            None => POOL_DATASET_PATH.to_string(),
            Some(options) => {
                let query = serde_urlencoded::to_string(options).map_err(|e| {
                    TrueNasError::Request(RequestError::InvalidQuery(e.to_string()))
                })?;
                if query.is_empty() {
                    POOL_DATASET_PATH.to_string()
                } else {
                    format!("{}?{}", POOL_DATASET_PATH, query)
                }
            }
        };

        self.executor.execute(HttpMethod::Get, &path, None).await
    }

    /// Deletes a dataset by its path-like id.
    ///
    /// Any response body is discarded. Not idempotent: a second delete
    /// surfaces the server's not-found error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> TrueNasResult<()> {
        let path = format!("{}/id/{}", POOL_DATASET_PATH, id);
        self.executor
            .execute_empty(HttpMethod::Delete, &path, None)
            .await
    }
}

impl std::fmt::Debug for PoolDatasetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolDatasetService").finish()
    }
}
