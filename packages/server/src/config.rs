use common::config::StorageConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Whether the trusted-gateway marker header is mandatory.
    pub production: bool,
    /// Shared secret the gateway must present in `x-proxy-secret`.
    /// Empty disables the check.
    #[serde(default)]
    pub proxy_secret: String,
    /// HMAC secret for the session cookie token.
    pub session_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Redis connection URL.
    #[serde(default = "default_cache_url")]
    pub url: String,
    /// TTL in seconds for cached published-page lookups.
    #[serde(default = "default_publish_ttl")]
    pub publish_ttl_secs: u64,
}

fn default_cache_url() -> String {
    "redis://localhost:6379".into()
}
fn default_publish_ttl() -> u64 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: default_cache_url(),
            publish_ttl_secs: default_publish_ttl(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.production", false)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., PAGESMITH__AUTH__SESSION_SECRET)
            .add_source(Environment::with_prefix("PAGESMITH").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
