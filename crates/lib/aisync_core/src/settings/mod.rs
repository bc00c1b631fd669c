// @awa-component: INT-TenantSettings
//
//! Per-tenant integration settings: the lookup contract, row projection and cache.

pub mod cache;
pub mod queries;
pub mod resolver;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::credentials::{CredentialSet, Secret};

pub const API_KEY: &str = "apiKey";
pub const API_SECRET: &str = "apiSecret";
pub const OPEN_AI_SECRET_KEY: &str = "openAiSecretKey";
pub const OPEN_AI_ORGANIZATION_ID: &str = "openAiOrganizationId";

/// Settings lookup errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// One stored `{settingsName, settingsValue}` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRow {
    pub settings_name: String,
    pub settings_value: String,
}

impl SettingRow {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            settings_name: name.into(),
            settings_value: value.into(),
        }
    }
}

/// Project stored pairs into a name → value map. Later rows win.
pub fn array_to_object(rows: &[SettingRow]) -> HashMap<String, String> {
    rows.iter()
        .map(|r| (r.settings_name.clone(), r.settings_value.clone()))
        .collect()
}

/// Cached integration settings for one (tenant, organization, provider).
#[derive(Clone, PartialEq)]
pub struct TenantSettings {
    pub tenant_id: String,
    pub organization_id: String,
    pub provider: String,
    pub values: HashMap<String, String>,
    pub fetched_at: DateTime<Utc>,
    pub ttl: chrono::Duration,
}

impl std::fmt::Debug for TenantSettings {
    // Values hold secrets; only their names are printed.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort();
        f.debug_struct("TenantSettings")
            .field("tenant_id", &self.tenant_id)
            .field("organization_id", &self.organization_id)
            .field("provider", &self.provider)
            .field("names", &names)
            .field("fetched_at", &self.fetched_at)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TenantSettings {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.fetched_at + self.ttl
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }

    fn non_empty(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Credentials to install for this tenant.
    ///
    /// Returns `None` unless both `apiKey` and `apiSecret` are present.
    pub fn credentials(&self) -> Option<CredentialSet> {
        let api_key = self.non_empty(API_KEY)?;
        let api_secret = self.non_empty(API_SECRET)?;
        Some(CredentialSet {
            api_key: Some(Secret::new(api_key)),
            api_secret: Some(Secret::new(api_secret)),
            open_ai_secret_key: self.non_empty(OPEN_AI_SECRET_KEY).map(Secret::new),
            open_ai_organization_id: self.non_empty(OPEN_AI_ORGANIZATION_ID).map(str::to_string),
            bearer_token: None,
            tenant_id_override: None,
        })
    }
}

/// Read access to the local settings store.
#[async_trait]
pub trait SettingsLookup: Send + Sync {
    /// Stored pairs for the key, or `None` when the tenant has no such integration.
    async fn lookup(
        &self,
        tenant_id: &str,
        organization_id: &str,
        provider: &str,
    ) -> Result<Option<Vec<SettingRow>>, SettingsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(rows: &[SettingRow]) -> TenantSettings {
        TenantSettings {
            tenant_id: "t1".into(),
            organization_id: "o1".into(),
            provider: "ai".into(),
            values: array_to_object(rows),
            fetched_at: Utc::now(),
            ttl: chrono::Duration::minutes(5),
        }
    }

    #[test]
    fn array_to_object_projects_pairs() {
        let map = array_to_object(&[
            SettingRow::new(API_KEY, "k"),
            SettingRow::new(API_SECRET, "s"),
        ]);
        assert_eq!(map.get(API_KEY).map(String::as_str), Some("k"));
        assert_eq!(map.get(API_SECRET).map(String::as_str), Some("s"));
    }

    #[test]
    fn credentials_require_key_and_secret() {
        assert!(settings(&[SettingRow::new(API_KEY, "k")]).credentials().is_none());
        assert!(
            settings(&[SettingRow::new(API_KEY, "k"), SettingRow::new(API_SECRET, " ")])
                .credentials()
                .is_none()
        );

        let creds = settings(&[
            SettingRow::new(API_KEY, "k"),
            SettingRow::new(API_SECRET, "s"),
            SettingRow::new(OPEN_AI_ORGANIZATION_ID, "org-1"),
        ])
        .credentials()
        .unwrap();
        assert_eq!(creds.api_key, Some(Secret::new("k")));
        assert_eq!(creds.open_ai_organization_id.as_deref(), Some("org-1"));
        assert!(creds.open_ai_secret_key.is_none());
    }

    #[test]
    fn debug_output_hides_values() {
        let rendered = format!(
            "{:?}",
            settings(&[SettingRow::new(API_SECRET, "super-secret-value")])
        );
        assert!(rendered.contains(API_SECRET));
        assert!(!rendered.contains("super-secret-value"));
    }
}
