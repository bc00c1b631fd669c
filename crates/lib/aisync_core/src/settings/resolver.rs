//! Per-tenant credential context built from cached settings.

use std::sync::Arc;

use tracing::debug;

use super::SettingsError;
use super::cache::SettingsCache;
use crate::credentials::{ConfigOverlay, CredentialSet};

/// Builds one [`ConfigOverlay`] per request or event.
pub struct CredentialResolver {
    cache: Arc<SettingsCache>,
    default: CredentialSet,
    provider: String,
}

impl CredentialResolver {
    pub fn new(cache: Arc<SettingsCache>, default: CredentialSet, provider: impl Into<String>) -> Self {
        Self {
            cache,
            default,
            provider: provider.into(),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn cache(&self) -> &SettingsCache {
        &self.cache
    }

    /// An overlay with nothing installed.
    pub fn default_overlay(&self) -> ConfigOverlay {
        ConfigOverlay::new(self.default.clone())
    }

    /// A fresh overlay for the tenant.
    ///
    /// Tenant credentials are installed only when both `apiKey` and
    /// `apiSecret` are stored; otherwise the overlay stays at the default.
    pub async fn overlay_for(
        &self,
        tenant_id: Option<&str>,
        organization_id: Option<&str>,
    ) -> Result<ConfigOverlay, SettingsError> {
        let mut overlay = self.default_overlay();
        overlay.reset();

        let (Some(tenant_id), Some(organization_id)) = (tenant_id, organization_id) else {
            return Ok(overlay);
        };

        let settings = self
            .cache
            .get(tenant_id, organization_id, &self.provider)
            .await?;
        match settings.as_ref().and_then(|s| s.credentials()) {
            Some(credentials) => {
                debug!(tenant_id, organization_id, "tenant credentials installed");
                overlay.install(credentials);
            }
            None => debug!(tenant_id, organization_id, "no tenant credentials, using defaults"),
        }
        Ok(overlay)
    }
}
