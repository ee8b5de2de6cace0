/// Errors that can occur during blob storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No object exists at the requested key.
    #[error("blob not found: {0}")]
    NotFound(String),
    /// The key is malformed (empty, too long, or contains illegal bytes).
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    /// The object exceeds the configured size limit.
    #[error("blob exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
    /// The backing store failed or returned an unexpected status.
    #[error("storage backend error: {0}")]
    Backend(String),
}
