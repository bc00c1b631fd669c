//! Integration configuration.

use std::time::Duration;

use crate::credentials::{CredentialSet, Secret};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_SETTINGS_TTL_SECS: u64 = 300;
pub const DEFAULT_PROVIDER: &str = "ai";

/// Configuration for the remote AI integration.
#[derive(Debug, Clone)]
pub struct IntegrationConfig {
    /// GraphQL endpoint URL.
    pub graphql_endpoint: Option<String>,
    /// Base URL for the REST operations.
    pub rest_endpoint: Option<String>,
    /// Process-wide fallback `X-APP-ID`.
    pub api_key: Option<Secret>,
    /// Process-wide fallback `X-API-KEY`.
    pub api_secret: Option<Secret>,
    /// Per-call timeout; a timed-out call fails as unreachable.
    pub request_timeout: Duration,
    pub settings_ttl: Duration,
    /// Integration name used as the settings key.
    pub provider: String,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: None,
            rest_endpoint: None,
            api_key: None,
            api_secret: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            settings_ttl: Duration::from_secs(DEFAULT_SETTINGS_TTL_SECS),
            provider: DEFAULT_PROVIDER.to_string(),
        }
    }
}

impl IntegrationConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable                  | Default |
    /// |---------------------------|---------|
    /// | `AI_GRAPHQL_ENDPOINT`     | unset   |
    /// | `AI_REST_ENDPOINT`        | unset   |
    /// | `AI_API_KEY`              | unset   |
    /// | `AI_API_SECRET`           | unset   |
    /// | `AI_REQUEST_TIMEOUT_SECS` | `300`   |
    /// | `AI_SETTINGS_TTL_SECS`    | `300`   |
    /// | `AI_PROVIDER`             | `ai`    |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| get(name).filter(|v| !v.trim().is_empty());
        let secs = |name: &str, default: u64| {
            non_empty(name)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        Self {
            graphql_endpoint: non_empty("AI_GRAPHQL_ENDPOINT"),
            rest_endpoint: non_empty("AI_REST_ENDPOINT"),
            api_key: non_empty("AI_API_KEY").map(Secret::new),
            api_secret: non_empty("AI_API_SECRET").map(Secret::new),
            request_timeout: Duration::from_secs(secs(
                "AI_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            settings_ttl: Duration::from_secs(secs("AI_SETTINGS_TTL_SECS", DEFAULT_SETTINGS_TTL_SECS)),
            provider: non_empty("AI_PROVIDER").unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
        }
    }

    /// Both endpoints are required for the integration to be enabled.
    pub fn is_enabled(&self) -> bool {
        self.graphql_endpoint.is_some() && self.rest_endpoint.is_some()
    }

    /// The static fallback credential set.
    pub fn static_credentials(&self) -> CredentialSet {
        CredentialSet {
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            ..CredentialSet::default()
        }
    }
}
