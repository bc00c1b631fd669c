//! API server configuration.

use aisync_core::IntegrationConfig;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3200";
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/aisync";

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3200").
    pub bind_addr: String,
    /// PostgreSQL connection URL for the tenant settings store.
    pub database_url: String,
    pub integration: IntegrationConfig,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable       | Default                             |
    /// |----------------|-------------------------------------|
    /// | `BIND_ADDR`    | `127.0.0.1:3200`                    |
    /// | `DATABASE_URL` | `postgres://localhost:5432/aisync`  |
    ///
    /// Integration variables are documented on [`IntegrationConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
            integration: IntegrationConfig::from_env(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            database_url: DEFAULT_DATABASE_URL.into(),
            integration: IntegrationConfig::default(),
        }
    }
}
