// @awa-component: INT-SettingsCache
//
//! In-memory tenant settings cache with TTL-based expiration.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{SettingsError, SettingsLookup, TenantSettings, array_to_object};

/// Default TTL for tenant settings: 5 minutes.
pub const DEFAULT_SETTINGS_TTL_MS: i64 = 300_000;

/// Cache key: one entry per (tenant, organization, provider).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SettingsKey {
    tenant_id: String,
    organization_id: String,
    provider: String,
}

/// Settings cache backed by a [`SettingsLookup`] on miss.
///
/// Negative results are not cached. Concurrent misses for one key may both
/// hit the lookup; the last write wins.
pub struct SettingsCache {
    lookup: Arc<dyn SettingsLookup>,
    entries: RwLock<HashMap<SettingsKey, TenantSettings>>,
    /// TTL for entries (milliseconds).
    pub ttl_ms: i64,
}

impl SettingsCache {
    /// Create a new cache with the default TTL.
    pub fn new(lookup: Arc<dyn SettingsLookup>) -> Self {
        Self::with_ttl_ms(lookup, DEFAULT_SETTINGS_TTL_MS)
    }

    pub fn with_ttl_ms(lookup: Arc<dyn SettingsLookup>, ttl_ms: i64) -> Self {
        Self {
            lookup,
            entries: RwLock::new(HashMap::new()),
            ttl_ms,
        }
    }

    fn key(tenant_id: &str, organization_id: &str, provider: &str) -> SettingsKey {
        SettingsKey {
            tenant_id: tenant_id.to_string(),
            organization_id: organization_id.to_string(),
            provider: provider.to_string(),
        }
    }

    /// Get settings for the key, consulting the lookup on miss or expiry.
    ///
    /// Empty tenant or organization ids short-circuit to `None` without a lookup.
    pub async fn get(
        &self,
        tenant_id: &str,
        organization_id: &str,
        provider: &str,
    ) -> Result<Option<TenantSettings>, SettingsError> {
        if tenant_id.trim().is_empty() || organization_id.trim().is_empty() {
            return Ok(None);
        }

        let key = Self::key(tenant_id, organization_id, provider);

        // Check cache first
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key) {
                if entry.is_fresh(Utc::now()) {
                    return Ok(Some(entry.clone()));
                }
            }
        }

        debug!(tenant_id, organization_id, provider, "settings cache miss");

        let Some(rows) = self
            .lookup
            .lookup(tenant_id, organization_id, provider)
            .await?
        else {
            return Ok(None);
        };

        let settings = TenantSettings {
            tenant_id: tenant_id.to_string(),
            organization_id: organization_id.to_string(),
            provider: provider.to_string(),
            values: array_to_object(&rows),
            fetched_at: Utc::now(),
            ttl: chrono::Duration::milliseconds(self.ttl_ms),
        };

        let mut entries = self.entries.write().await;
        // Drop expired entries of every key.
        let now = settings.fetched_at;
        entries.retain(|_, entry| entry.is_fresh(now));
        entries.insert(key, settings.clone());
        Ok(Some(settings))
    }

    /// Remove a specific entry from the cache.
    pub async fn invalidate(&self, tenant_id: &str, organization_id: &str, provider: &str) {
        let key = Self::key(tenant_id, organization_id, provider);
        self.entries.write().await.remove(&key);
    }

    /// Remove all entries for a tenant (every organization and provider).
    pub async fn invalidate_tenant(&self, tenant_id: &str) {
        self.entries
            .write()
            .await
            .retain(|key, _| key.tenant_id != tenant_id);
    }

    /// Number of cached entries, fresh or not yet swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Remove all entries from the cache.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
