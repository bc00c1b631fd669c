// @awa-component: INT-RemoteClient
//
//! Outbound auth headers.

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::credentials::CredentialSet;
use crate::error::{IntegrationError, IntegrationResult};

pub const X_APP_ID: &str = "x-app-id";
pub const X_API_KEY: &str = "x-api-key";
pub const X_OPENAI_SECRET_KEY: &str = "x-openai-secret-key";
pub const X_OPENAI_ORGANIZATION_ID: &str = "x-openai-organization-id";
pub const TENANT_ID: &str = "tenant-id";

/// Credentials for one call, before the process-wide fallback is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCredentials {
    /// What the caller's overlay resolved to.
    pub effective: CredentialSet,
    /// Per-call override; wins over `effective`.
    pub explicit: Option<CredentialSet>,
}

impl RequestCredentials {
    pub fn new(effective: CredentialSet) -> Self {
        Self {
            effective,
            explicit: None,
        }
    }

    pub fn with_explicit(mut self, explicit: CredentialSet) -> Self {
        self.explicit = Some(explicit);
        self
    }

    /// Resolve against the static fallback: explicit > effective > fallback.
    pub fn resolve(&self, fallback: &CredentialSet) -> CredentialSet {
        let merged = fallback.merged_with(&self.effective);
        match &self.explicit {
            Some(explicit) => merged.merged_with(explicit),
            None => merged,
        }
    }
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) -> IntegrationResult<()> {
    if value.is_empty() {
        return Ok(());
    }
    let mut value = HeaderValue::from_str(value)
        .map_err(|_| IntegrationError::Validation(format!("invalid value for header {name}")))?;
    value.set_sensitive(name != TENANT_ID);
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

/// Build the header set for one outbound call.
///
/// A bearer token replaces the `X-APP-ID`/`X-API-KEY` pair. OpenAI and
/// tenant headers appear only when their value is present and non-empty.
pub fn build_headers(
    fallback: &CredentialSet,
    credentials: &RequestCredentials,
    json_body: bool,
) -> IntegrationResult<HeaderMap> {
    let creds = credentials.resolve(fallback);
    let mut headers = HeaderMap::new();

    if json_body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    match creds.bearer_token.as_ref().filter(|t| !t.is_empty()) {
        Some(token) => {
            let mut value = HeaderValue::from_str(token.expose()).map_err(|_| {
                IntegrationError::Validation("invalid value for header authorization".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        None => {
            if let Some(key) = &creds.api_key {
                insert(&mut headers, X_APP_ID, key.expose())?;
            }
            if let Some(secret) = &creds.api_secret {
                insert(&mut headers, X_API_KEY, secret.expose())?;
            }
        }
    }

    if let Some(secret) = &creds.open_ai_secret_key {
        insert(&mut headers, X_OPENAI_SECRET_KEY, secret.expose())?;
    }
    if let Some(org) = &creds.open_ai_organization_id {
        insert(&mut headers, X_OPENAI_ORGANIZATION_ID, org)?;
    }
    if let Some(tenant) = &creds.tenant_id_override {
        insert(&mut headers, TENANT_ID, tenant)?;
    }

    Ok(headers)
}
