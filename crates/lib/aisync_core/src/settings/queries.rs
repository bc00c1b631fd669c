// @awa-component: INT-TenantSettings
//
//! Postgres-backed settings lookup.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{SettingRow, SettingsError, SettingsLookup};

/// Reads integration settings from the `integration_tenant` / `integration_setting` tables.
#[derive(Clone)]
pub struct PgSettingsLookup {
    pool: PgPool,
}

impl PgSettingsLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Find the integration row for (tenant, organization, provider).
pub async fn find_integration_id(
    pool: &PgPool,
    tenant_id: &str,
    organization_id: &str,
    provider: &str,
) -> Result<Option<String>, SettingsError> {
    let row = sqlx::query_as::<_, (String,)>(
        "SELECT id::text FROM integration_tenant \
         WHERE tenant_id::text = $1 AND organization_id::text = $2 AND name = $3 \
         AND is_active = true AND is_archived = false \
         ORDER BY created_at DESC LIMIT 1",
    )
    .bind(tenant_id)
    .bind(organization_id)
    .bind(provider)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id,)| id))
}

/// All stored `{settingsName, settingsValue}` pairs for one integration.
pub async fn get_settings(
    pool: &PgPool,
    integration_id: &str,
) -> Result<Vec<SettingRow>, SettingsError> {
    let rows = sqlx::query_as::<_, (String, Option<String>)>(
        "SELECT settings_name, settings_value FROM integration_setting \
         WHERE integration_id::text = $1 \
         ORDER BY settings_name",
    )
    .bind(integration_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(name, value)| SettingRow::new(name, value.unwrap_or_default()))
        .collect())
}

#[async_trait]
impl SettingsLookup for PgSettingsLookup {
    async fn lookup(
        &self,
        tenant_id: &str,
        organization_id: &str,
        provider: &str,
    ) -> Result<Option<Vec<SettingRow>>, SettingsError> {
        let Some(integration_id) =
            find_integration_id(&self.pool, tenant_id, organization_id, provider).await?
        else {
            return Ok(None);
        };
        Ok(Some(get_settings(&self.pool, &integration_id).await?))
    }
}
