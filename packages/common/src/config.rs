use serde::Deserialize;

/// Which blob store backend to use.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-memory store for local development and tests.
    Memory,
    /// S3-compatible object store.
    S3,
}

/// Blob storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Backend selection. Default: memory.
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    /// Bucket name (S3 backend only).
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Region name (S3 backend only). Default: "us-east-1".
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO etc). Empty means AWS.
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
    /// Base URL under which stored objects are publicly reachable.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum object size in bytes. Default: 8 MiB.
    #[serde(default = "default_max_blob_size")]
    pub max_blob_size: u64,
}

fn default_backend() -> StorageBackend {
    StorageBackend::Memory
}
fn default_bucket() -> String {
    "pagesmith".into()
}
fn default_region() -> String {
    "us-east-1".into()
}
fn default_public_base_url() -> String {
    "http://localhost:3000/blobs".into()
}
fn default_max_blob_size() -> u64 {
    8 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            bucket: default_bucket(),
            region: default_region(),
            endpoint: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            public_base_url: default_public_base_url(),
            max_blob_size: default_max_blob_size(),
        }
    }
}
