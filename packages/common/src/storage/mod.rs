mod error;
mod traits;

pub mod memory;
pub mod s3;

pub use error::StorageError;
pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;
pub use traits::{BlobRecord, BlobStore};
