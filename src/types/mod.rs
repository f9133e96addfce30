//! Type definitions for the TrueNAS pool-dataset resource.
//!
//! Field names follow the wire format of the TrueNAS REST API exactly
//! (snake_case keys such as `volblocksize` and
//! `special_small_block_size`); optional fields are modeled as `Option`
//! so that "absent" and "explicitly set" stay distinguishable through
//! encode/decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of dataset: a ZFS filesystem or a block-device volume (zvol).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DatasetType {
    /// A ZFS filesystem dataset.
    Filesystem,
    /// A block-device-like dataset (zvol).
    Volume,
}

/// Provenance of a dataset property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertySource {
    /// Set directly on this dataset.
    Local,
    /// Inherited from an ancestor dataset.
    Inherited,
    /// ZFS default, never set anywhere.
    Default,
    /// No source reported.
    None,
    /// Any source string this client does not know about.
    #[serde(other)]
    Unknown,
}

/// One tunable dataset property as reported by the backend.
///
/// Carries four parallel representations of the same setting plus its
/// provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    /// Value parsed by the middleware (number, bool, or string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<Value>,

    /// Raw value as stored by ZFS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rawvalue: Option<String>,

    /// Display value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Where the value comes from (local, inherited, default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PropertySource>,
}

/// A pool dataset as returned by the server.
///
/// Instances exist only as deserialized responses; every field is
/// optional to tolerate partial server payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolDataset {
    /// Server-assigned path-like identifier, e.g. `tank/data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Dataset name, identical to the id for ZFS datasets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Pool the dataset lives in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<String>,

    /// Dataset kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub dataset_type: Option<DatasetType>,

    /// Mountpoint, if mounted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mountpoint: Option<String>,

    /// Whether the dataset is encrypted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<bool>,

    /// Whether this dataset holds its own encryption key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_root: Option<bool>,

    /// Whether the encryption key is currently loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_loaded: Option<bool>,

    /// Whether the dataset is locked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,

    /// Child datasets, forming a tree owned by this dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PoolDataset>>,

    /// User comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<PropertyValue>,

    /// Sync policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync: Option<PropertyValue>,

    /// Compression algorithm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<PropertyValue>,

    /// Access-time update policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atime: Option<PropertyValue>,

    /// Execute permission policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec: Option<PropertyValue>,

    /// Managing service marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managedby: Option<PropertyValue>,

    /// Quota on the dataset and its descendants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<PropertyValue>,

    /// Quota warning threshold (percent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_warning: Option<PropertyValue>,

    /// Quota critical threshold (percent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_critical: Option<PropertyValue>,

    /// Quota on the dataset itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refquota: Option<PropertyValue>,

    /// Refquota warning threshold (percent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refquota_warning: Option<PropertyValue>,

    /// Refquota critical threshold (percent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refquota_critical: Option<PropertyValue>,

    /// Space reserved for the dataset and its descendants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<PropertyValue>,

    /// Space reserved for the dataset itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreservation: Option<PropertyValue>,

    /// Number of copies of data to store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copies: Option<PropertyValue>,

    /// Visibility of the `.zfs` snapshot directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapdir: Option<PropertyValue>,

    /// Deduplication policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduplication: Option<PropertyValue>,

    /// Read-only flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readonly: Option<PropertyValue>,

    /// Record size for filesystem datasets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recordsize: Option<PropertyValue>,

    /// Filename case sensitivity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub casesensitivity: Option<PropertyValue>,

    /// ACL mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aclmode: Option<PropertyValue>,

    /// ACL type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acltype: Option<PropertyValue>,

    /// Extended-attribute storage mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xattr: Option<PropertyValue>,

    /// Volume size for zvols.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volsize: Option<PropertyValue>,

    /// Block size for zvols.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volblocksize: Option<PropertyValue>,

    /// Threshold below which blocks go to a special vdev.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_small_block_size: Option<PropertyValue>,

    /// Encryption key format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_format: Option<PropertyValue>,

    /// PBKDF2 iterations for passphrase-derived keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pbkdf2iters: Option<PropertyValue>,

    /// Clone origin snapshot, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<PropertyValue>,
}

/// Encryption parameters for dataset creation.
///
/// Nested one level under [`PoolDatasetCreate::encryption_options`];
/// omitted entirely when absent.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct EncryptionOptions {
    /// Have the middleware generate the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_key: Option<bool>,

    /// Key-derivation iteration count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pbkdf2iters: Option<i64>,

    /// Encryption algorithm, e.g. `AES-256-GCM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,

    /// Passphrase to derive the key from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,

    /// Raw key material, hex-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl std::fmt::Debug for EncryptionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionOptions")
            .field("generate_key", &self.generate_key)
            .field("pbkdf2iters", &self.pbkdf2iters)
            .field("algorithm", &self.algorithm)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Request payload for creating a dataset or zvol.
///
/// `name` and `type` are mandatory for the server to accept the request
/// but are not validated locally; they serialize as `null` when unset and
/// the server rejects the call, exactly like every other business rule.
/// All remaining fields are transmitted only when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolDatasetCreate {
    /// Full dataset name, e.g. `tank/data`.
    pub name: Option<String>,

    /// Dataset kind.
    #[serde(rename = "type")]
    pub dataset_type: Option<DatasetType>,

    /// Volume size in bytes (zvols only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volsize: Option<i64>,

    /// Volume block size in bytes (zvols only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volblocksize: Option<i64>,

    /// Create a sparse zvol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparse: Option<bool>,

    /// Skip the volume size sanity check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_size: Option<bool>,

    /// User comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    /// Sync policy: `STANDARD`, `ALWAYS`, or `DISABLED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync: Option<String>,

    /// Compression algorithm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,

    /// Access-time update policy: `ON` or `OFF`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atime: Option<String>,

    /// Execute permission policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec: Option<String>,

    /// Marker for the service managing this dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managedby: Option<String>,

    /// Quota in bytes for the dataset and its descendants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<i64>,

    /// Quota warning threshold (percent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_warning: Option<i64>,

    /// Quota critical threshold (percent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_critical: Option<i64>,

    /// Quota in bytes for the dataset itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refquota: Option<i64>,

    /// Refquota warning threshold (percent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refquota_warning: Option<i64>,

    /// Refquota critical threshold (percent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refquota_critical: Option<i64>,

    /// Reservation in bytes for the dataset and its descendants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<i64>,

    /// Reservation in bytes for the dataset itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreservation: Option<i64>,

    /// Threshold below which blocks go to a special vdev.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_small_block_size: Option<i64>,

    /// Number of copies of data to store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copies: Option<i64>,

    /// Visibility of the `.zfs` snapshot directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapdir: Option<String>,

    /// Deduplication policy: `ON`, `VERIFY`, or `OFF`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduplication: Option<String>,

    /// Read-only flag: `ON` or `OFF`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readonly: Option<String>,

    /// Record size, e.g. `128K`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recordsize: Option<String>,

    /// Filename case sensitivity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub casesensitivity: Option<String>,

    /// ACL mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aclmode: Option<String>,

    /// ACL type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acltype: Option<String>,

    /// Share preset: `GENERIC` or `SMB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_type: Option<String>,

    /// Extended-attribute storage mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xattr: Option<String>,

    /// Create the dataset encrypted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<bool>,

    /// Inherit encryption from the parent dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherit_encryption: Option<bool>,

    /// Encryption parameters; only meaningful with `encryption: true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_options: Option<EncryptionOptions>,
}

impl PoolDatasetCreate {
    /// Creates a request with the two server-mandated fields populated.
    pub fn new(name: impl Into<String>, dataset_type: DatasetType) -> Self {
        Self {
            name: Some(name.into()),
            dataset_type: Some(dataset_type),
            ..Self::default()
        }
    }
}

/// Query parameters accepted by TrueNAS collection endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Number of results to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Return only the result count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<bool>,

    /// Sort field, prefixed with `-` for descending order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}
