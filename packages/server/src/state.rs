use std::sync::Arc;

use common::storage::BlobStore;

use crate::cache::SharedCache;
use crate::config::AppConfig;
use crate::vfs::FileTree;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub blob_store: Arc<dyn BlobStore>,
    pub tree: FileTree,
    pub cache: SharedCache,
}

impl AppState {
    pub fn new(config: AppConfig, blob_store: Arc<dyn BlobStore>) -> Self {
        let cache = SharedCache::new(config.cache.url.clone());
        Self {
            config: Arc::new(config),
            tree: FileTree::with_cache(blob_store.clone(), Arc::new(cache.clone())),
            blob_store,
            cache,
        }
    }
}
