//! # aisync_core
//!
//! Sync client for the remote AI job-matching service: tenant credential
//! resolution, typed remote access, upserts, job matching and criteria
//! replication.

pub mod config;
pub mod credentials;
pub mod criteria;
pub mod error;
pub mod events;
pub mod matching;
pub mod models;
pub mod remote;
pub mod service;
pub mod settings;
pub mod sync;

#[cfg(test)]
mod fake;

pub use config::IntegrationConfig;
pub use credentials::{ConfigOverlay, CredentialSet, Secret};
pub use error::{IntegrationError, IntegrationResult};
pub use service::{AiSession, Capability, IntegrationAi};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
