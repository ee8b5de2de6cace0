use std::net::SocketAddr;
use std::sync::Arc;

// `::common` is the workspace library crate; `crate::common` is this module.
use ::common::config::StorageConfig;
use ::common::storage::{BlobStore, MemoryBlobStore};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use server::config::{AppConfig, AuthConfig, CacheConfig, CorsConfig, ServerConfig};
use server::state::AppState;

pub const SESSION_SECRET: &str = "test-secret-for-integration-tests";
pub const PROXY_SECRET: &str = "test-proxy-secret";

pub mod routes {
    pub const FILES: &str = "/api/files";
    pub const FILES_CONTENT: &str = "/api/files/content";
    pub const FILES_RENAME: &str = "/api/files/rename";
    pub const CHAT_TOOLS: &str = "/api/chat/tools";
    pub const SESSION: &str = "/api/session";
    pub const SESSION_ME: &str = "/api/session/me";
    pub const DIAG_STORAGE: &str = "/api/diag/storage";
    pub const DIAG_CACHE: &str = "/api/diag/cache";
}

/// A running test server over an in-memory blob store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    /// Direct handle to the backing store for seeding and assertions.
    pub store: Arc<MemoryBlobStore>,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_auth(AuthConfig {
            production: false,
            proxy_secret: String::new(),
            session_secret: SESSION_SECRET.to_string(),
        })
        .await
    }

    pub async fn spawn_with_auth(auth: AuthConfig) -> Self {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            auth,
            storage: StorageConfig::default(),
            cache: CacheConfig {
                // Not a redis URL, so the client fails at open without the
                // connection retry backoff; every call degrades to a miss.
                url: "cache-disabled".to_string(),
                publish_ttl_secs: 60,
            },
        };

        let store = Arc::new(MemoryBlobStore::new(
            "https://blobs.test",
            config.storage.max_blob_size,
        ));
        let state = AppState::new(config, store.clone());
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to build client"),
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Attach the identity headers the gateway would set.
    fn identity(&self, req: RequestBuilder, tenant: &str) -> RequestBuilder {
        req.header("x-tenant-id", tenant)
            .header("x-user-id", "user-1")
            .header("x-user-email", "user@example.com")
    }

    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    pub async fn get_as(&self, path: &str, tenant: &str) -> TestResponse {
        let res = self
            .identity(self.client.get(self.url(path)), tenant)
            .send()
            .await
            .expect("Failed to send GET request");
        TestResponse::from_response(res).await
    }

    pub async fn post_as(&self, path: &str, body: &Value, tenant: &str) -> TestResponse {
        let res = self
            .identity(self.client.post(self.url(path)), tenant)
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn delete_as(&self, path: &str, tenant: &str) -> TestResponse {
        let res = self
            .identity(self.client.delete(self.url(path)), tenant)
            .send()
            .await
            .expect("Failed to send DELETE request");
        TestResponse::from_response(res).await
    }

    /// GET without any identity, as an anonymous visitor would.
    pub async fn get_public(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    /// Seed a blob directly, bypassing the API.
    pub async fn seed(&self, key: &str, body: &[u8]) {
        self.store
            .put(key, body, "text/html")
            .await
            .expect("Failed to seed blob");
    }

    pub async fn blob_exists(&self, key: &str) -> bool {
        self.store
            .head(key)
            .await
            .expect("Failed to head blob")
            .is_some()
    }
}
