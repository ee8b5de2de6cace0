use async_trait::async_trait;
use chrono::{DateTime, Utc};
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};

use crate::config::StorageConfig;

use super::error::StorageError;
use super::traits::{BlobRecord, BlobStore, validate_key};

/// S3-compatible blob store backend.
///
/// Works against AWS S3 or any S3-compatible store (MinIO, R2) via a custom
/// endpoint. Object URLs are derived from `public_base_url`, not presigned.
pub struct S3BlobStore {
    bucket: Box<Bucket>,
    public_base_url: String,
    max_size: u64,
}

impl S3BlobStore {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let region = if config.endpoint.is_empty() {
            config
                .region
                .parse()
                .map_err(|e: std::str::Utf8Error| StorageError::Backend(e.to_string()))?
        } else {
            Region::Custom {
                region: config.region.clone(),
                endpoint: config.endpoint.clone(),
            }
        };

        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(e.to_string()))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        if !config.endpoint.is_empty() {
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            bucket,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            max_size: config.max_blob_size,
        })
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

fn map_err(key: &str, err: S3Error) -> StorageError {
    match err {
        S3Error::HttpFailWithBody(404, _) => StorageError::NotFound(key.to_string()),
        other => StorageError::Backend(other.to_string()),
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn list(
        &self,
        prefix: &str,
        limit: Option<usize>,
    ) -> Result<Vec<BlobRecord>, StorageError> {
        let pages = self
            .bucket
            .list(prefix.to_string(), None)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let mut records: Vec<BlobRecord> = pages
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|obj| BlobRecord {
                url: self.url_for(&obj.key),
                size: obj.size,
                uploaded_at: parse_timestamp(&obj.last_modified),
                pathname: obj.key,
            })
            .collect();

        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        validate_key(key)?;
        let response = self
            .bucket
            .get_object(key)
            .await
            .map_err(|e| map_err(key, e))?;
        match response.status_code() {
            200..=299 => Ok(response.bytes().to_vec()),
            404 => Err(StorageError::NotFound(key.to_string())),
            code => Err(StorageError::Backend(format!(
                "get '{key}' returned status {code}"
            ))),
        }
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
        self.bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(|e| map_err(key, e))?;

        Ok(BlobRecord {
            pathname: key.to_string(),
            url: self.url_for(key),
            size: data.len() as u64,
            uploaded_at: Utc::now(),
        })
    }

    async fn copy(&self, from: &str, to: &str) -> Result<(), StorageError> {
        validate_key(from)?;
        validate_key(to)?;
        let code = self
            .bucket
            .copy_object_internal(from, to)
            .await
            .map_err(|e| map_err(from, e))?;
        if (200..300).contains(&code) {
            Ok(())
        } else {
            Err(StorageError::Backend(format!(
                "copy '{from}' -> '{to}' returned status {code}"
            )))
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        match self.bucket.delete_object(key).await {
            Ok(_) => Ok(true),
            Err(S3Error::HttpFailWithBody(404, _)) => Ok(false),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }

    async fn head(&self, key: &str) -> Result<Option<BlobRecord>, StorageError> {
        validate_key(key)?;
        match self.bucket.head_object(key).await {
            Ok((head, code)) if (200..300).contains(&code) => Ok(Some(BlobRecord {
                pathname: key.to_string(),
                url: self.url_for(key),
                size: head.content_length.unwrap_or(0).max(0) as u64,
                uploaded_at: head
                    .last_modified
                    .as_deref()
                    .map(parse_timestamp)
                    .unwrap_or_else(Utc::now),
            })),
            Ok((_, 404)) => Ok(None),
            Ok((_, code)) => Err(StorageError::Backend(format!(
                "head '{key}' returned status {code}"
            ))),
            Err(S3Error::HttpFailWithBody(404, _)) => Ok(None),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }
}
