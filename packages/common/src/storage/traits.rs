use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::StorageError;

/// Metadata for one stored object, as reported by the backing store.
///
/// Records are never mutated in place; a move is always copy-then-delete.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobRecord {
    /// Absolute storage key.
    pub pathname: String,
    /// URL under which the object is reachable.
    pub url: String,
    /// Object size in bytes.
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// Key-addressed blob storage with prefix listing.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// List objects whose key starts with `prefix`, in key order.
    ///
    /// `limit` caps the number of returned records; `None` returns everything
    /// the store's native listing yields.
    async fn list(&self, prefix: &str, limit: Option<usize>)
    -> Result<Vec<BlobRecord>, StorageError>;

    /// Retrieve the full content of the object at `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Store `data` at `key`, overwriting any existing object.
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<BlobRecord, StorageError>;

    /// Copy the object at `from` to `to`. The source is left untouched.
    async fn copy(&self, from: &str, to: &str) -> Result<(), StorageError>;

    /// Delete the object at `key`.
    ///
    /// Returns `true` if an object was deleted, `false` if none existed.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// Fetch metadata for the object at `key` without its content.
    async fn head(&self, key: &str) -> Result<Option<BlobRecord>, StorageError>;
}

/// Reject keys the backends cannot represent safely.
pub(super) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key cannot be empty".into()));
    }
    if key.len() > 1024 {
        return Err(StorageError::InvalidKey(
            "key exceeds maximum length of 1024 bytes".into(),
        ));
    }
    if key.contains('\0') {
        return Err(StorageError::InvalidKey(
            "key must not contain null bytes".into(),
        ));
    }
    if key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "key must not start with '/'".into(),
        ));
    }
    Ok(())
}
