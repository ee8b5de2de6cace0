use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::StorageError;
use super::traits::{BlobRecord, BlobStore, validate_key};

struct StoredObject {
    data: Vec<u8>,
    content_type: String,
    uploaded_at: DateTime<Utc>,
}

/// In-memory key-addressed blob store for tests and local development.
///
/// Keys are held in a sorted map so prefix listing matches the key ordering
/// of an S3-style store.
pub struct MemoryBlobStore {
    objects: RwLock<BTreeMap<String, StoredObject>>,
    base_url: String,
    max_size: u64,
}

impl MemoryBlobStore {
    pub fn new(base_url: impl Into<String>, max_size: u64) -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_size,
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    fn record(&self, key: &str, obj: &StoredObject) -> BlobRecord {
        BlobRecord {
            pathname: key.to_string(),
            url: self.url_for(key),
            size: obj.data.len() as u64,
            uploaded_at: obj.uploaded_at,
        }
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("memory://blobs", 8 * 1024 * 1024)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn list(
        &self,
        prefix: &str,
        limit: Option<usize>,
    ) -> Result<Vec<BlobRecord>, StorageError> {
        let objects = self.objects.read().unwrap_or_else(|e| e.into_inner());
        let records = objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .take(limit.unwrap_or(usize::MAX))
            .map(|(key, obj)| self.record(key, obj))
            .collect();
        Ok(records)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        validate_key(key)?;
        let objects = self.objects.read().unwrap_or_else(|e| e.into_inner());
        objects
            .get(key)
            .map(|obj| obj.data.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<BlobRecord, StorageError> {
        validate_key(key)?;
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }
        let obj = StoredObject {
            data: data.to_vec(),
            content_type: content_type.to_string(),
            uploaded_at: Utc::now(),
        };
        let record = self.record(key, &obj);
        let mut objects = self.objects.write().unwrap_or_else(|e| e.into_inner());
        objects.insert(key.to_string(), obj);
        Ok(record)
    }

    async fn copy(&self, from: &str, to: &str) -> Result<(), StorageError> {
        validate_key(from)?;
        validate_key(to)?;
        let mut objects = self.objects.write().unwrap_or_else(|e| e.into_inner());
        let src = objects
            .get(from)
            .ok_or_else(|| StorageError::NotFound(from.to_string()))?;
        let copied = StoredObject {
            data: src.data.clone(),
            content_type: src.content_type.clone(),
            uploaded_at: Utc::now(),
        };
        objects.insert(to.to_string(), copied);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        let mut objects = self.objects.write().unwrap_or_else(|e| e.into_inner());
        Ok(objects.remove(key).is_some())
    }

    async fn head(&self, key: &str) -> Result<Option<BlobRecord>, StorageError> {
        validate_key(key)?;
        let objects = self.objects.read().unwrap_or_else(|e| e.into_inner());
        Ok(objects.get(key).map(|obj| self.record(key, obj)))
    }
}
