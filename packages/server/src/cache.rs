use std::sync::Arc;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::OnceCell;

/// Best-effort key/value cache for published pages.
///
/// Every method degrades to a miss (or a no-op) on failure; callers never
/// see cache errors.
#[async_trait]
pub trait PageCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64);
    async fn del(&self, key: &str);
}

/// Process-wide handle to the auxiliary Redis cache.
///
/// The connection is created lazily on first use; `OnceCell` single-flights
/// concurrent first requests so they never race to open duplicate
/// connections. A failed initialization leaves the cell empty and is retried
/// on the next request. The manager reconnects internally after transient
/// drops; a PING guards each reuse. The connection lives for the process:
/// the manager closes when the last clone drops at shutdown.
#[derive(Clone)]
pub struct SharedCache {
    url: String,
    cell: Arc<OnceCell<ConnectionManager>>,
}

impl SharedCache {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cell: Arc::new(OnceCell::new()),
        }
    }

    async fn manager(&self) -> Result<ConnectionManager, redis::RedisError> {
        self.cell
            .get_or_try_init(|| async {
                let client = redis::Client::open(self.url.as_str())?;
                client.get_connection_manager().await
            })
            .await
            .cloned()
    }

    /// Health-checked connection, or `None` when the cache is unavailable.
    async fn conn(&self) -> Option<ConnectionManager> {
        let mut manager = match self.manager().await {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("Cache unavailable: {e}");
                return None;
            }
        };
        match redis::cmd("PING").query_async::<String>(&mut manager).await {
            Ok(_) => Some(manager),
            Err(e) => {
                tracing::debug!("Cache ping failed: {e}");
                None
            }
        }
    }

    /// Connectivity probe for diagnostics.
    pub async fn ping(&self) -> Result<(), String> {
        let mut manager = self.manager().await.map_err(|e| e.to_string())?;
        redis::cmd("PING")
            .query_async::<String>(&mut manager)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl PageCache for SharedCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn().await?;
        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Cache get '{key}' failed: {e}");
                None
            }
        }
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) {
        let Some(mut conn) = self.conn().await else {
            return;
        };
        if let Err(e) = conn.set_ex::<_, _, ()>(key, value, ttl_secs).await {
            tracing::debug!("Cache set '{key}' failed: {e}");
        }
    }

    async fn del(&self, key: &str) {
        let Some(mut conn) = self.conn().await else {
            return;
        };
        if let Err(e) = conn.del::<_, ()>(key).await {
            tracing::debug!("Cache del '{key}' failed: {e}");
        }
    }
}
