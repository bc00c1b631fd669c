//! Integration error taxonomy.

use thiserror::Error;

use crate::settings::SettingsError;

/// Convenience alias for integration operations.
pub type IntegrationResult<T> = Result<T, IntegrationError>;

/// Errors surfaced by the integration client.
///
/// A remote id that cannot be resolved is not an error: lookups return
/// `Option` and callers decide what an absent id means.
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("AI integration endpoints are not configured")]
    ConfigurationMissing,

    #[error("Remote service unreachable: {0}")]
    Unreachable(String),

    #[error("Remote service rejected {operation} with status {status}: {body}")]
    UpstreamRejected {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected payload from {operation}: {message}")]
    Decode { operation: String, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Settings lookup failed: {0}")]
    Settings(#[from] SettingsError),
}

impl IntegrationError {
    pub(crate) fn decode(operation: &str, message: impl Into<String>) -> Self {
        IntegrationError::Decode {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    /// `true` for transport failures (no response, timeout).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, IntegrationError::Unreachable(_))
    }
}
