// @awa-component: INT-ConfigOverlay
//
//! Credential sets and the per-request overlay that resolves the effective one.
//!
//! A [`ConfigOverlay`] is a plain value. Every inbound request (or every
//! concurrently running sync unit) owns its own overlay; nothing here is a
//! process-wide singleton.

use std::fmt;

/// A secret string that never prints its value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the plaintext. Only header building should need this.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Auth material for one outbound call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    /// Sent as `X-APP-ID`.
    pub api_key: Option<Secret>,
    /// Sent as `X-API-KEY`.
    pub api_secret: Option<Secret>,
    pub open_ai_secret_key: Option<Secret>,
    pub open_ai_organization_id: Option<String>,
    /// Full `Authorization` header value; replaces the API-key scheme when set.
    pub bearer_token: Option<Secret>,
    /// Sent as `Tenant-Id`.
    pub tenant_id_override: Option<String>,
}

impl CredentialSet {
    /// Credential set with only the API key pair.
    pub fn with_api_key(api_key: impl Into<Secret>, api_secret: impl Into<Secret>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            ..Self::default()
        }
    }

    /// `true` when neither API key nor bearer token is present.
    pub fn is_anonymous(&self) -> bool {
        self.api_key.is_none() && self.api_secret.is_none() && self.bearer_token.is_none()
    }

    /// Field-by-field merge: values present in `partial` win, the rest come from `self`.
    pub fn merged_with(&self, partial: &CredentialSet) -> CredentialSet {
        CredentialSet {
            api_key: partial.api_key.clone().or_else(|| self.api_key.clone()),
            api_secret: partial.api_secret.clone().or_else(|| self.api_secret.clone()),
            open_ai_secret_key: partial
                .open_ai_secret_key
                .clone()
                .or_else(|| self.open_ai_secret_key.clone()),
            open_ai_organization_id: partial
                .open_ai_organization_id
                .clone()
                .or_else(|| self.open_ai_organization_id.clone()),
            bearer_token: partial
                .bearer_token
                .clone()
                .or_else(|| self.bearer_token.clone()),
            tenant_id_override: partial
                .tenant_id_override
                .clone()
                .or_else(|| self.tenant_id_override.clone()),
        }
    }
}

/// Default credentials plus an optional per-request override.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverlay {
    default: CredentialSet,
    installed: Option<CredentialSet>,
}

impl ConfigOverlay {
    pub fn new(default: CredentialSet) -> Self {
        Self {
            default,
            installed: None,
        }
    }

    /// Replace the default set. An installed override is re-merged over it lazily.
    pub fn set_default(&mut self, default: CredentialSet) {
        self.default = default;
    }

    /// Install a partial override; missing fields fall back to the default.
    pub fn install(&mut self, partial: CredentialSet) {
        self.installed = Some(partial);
    }

    /// Drop any override and return to the default set.
    pub fn reset(&mut self) {
        self.installed = None;
    }

    pub fn has_override(&self) -> bool {
        self.installed.is_some()
    }

    /// The credential set outbound calls should use right now.
    pub fn effective(&self) -> CredentialSet {
        match &self.installed {
            Some(partial) => self.default.merged_with(partial),
            None => self.default.clone(),
        }
    }
}
