use std::net::SocketAddr;
use std::sync::Arc;

use common::config::StorageBackend;
use common::storage::{BlobStore, MemoryBlobStore, S3BlobStore};
use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let blob_store: Arc<dyn BlobStore> = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory blob store");
            Arc::new(MemoryBlobStore::new(
                config.storage.public_base_url.clone(),
                config.storage.max_blob_size,
            ))
        }
        StorageBackend::S3 => {
            info!(bucket = %config.storage.bucket, "Using S3 blob store");
            Arc::new(S3BlobStore::new(&config.storage)?)
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(config, blob_store);
    let app = server::build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("Shutting down");
}
