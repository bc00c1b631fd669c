//! # aisync_api
//!
//! HTTP API for the AI integration sync client.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use aisync_core::events::EventPublisher;
use aisync_core::settings::SettingsLookup;
use aisync_core::settings::cache::SettingsCache;
use aisync_core::settings::queries::PgSettingsLookup;
use aisync_core::settings::resolver::CredentialResolver;
use aisync_core::{IntegrationAi, IntegrationResult};
use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{applications, employees, job_posts, status};

/// Route paths.
pub mod routes {
    pub const STATUS: &str = "/integration/ai/status";
    pub const EMPLOYEES_SYNC: &str = "/integration/ai/employees/sync";
    pub const EMPLOYEES_STATUS: &str = "/integration/ai/employees/status";
    pub const EMPLOYEES_CRITERIA: &str = "/integration/ai/employees/criteria";
    pub const EMPLOYEES_CHANGED: &str = "/integration/ai/employees/changed";
    pub const CRITERIA_CHANGED: &str = "/integration/ai/employees/criteria/changed";
    pub const TENANTS_SYNC: &str = "/integration/ai/tenants/sync";
    pub const JOB_POSTS_LIST: &str = "/integration/ai/job-posts/list";
    pub const JOB_POSTS_APPLY: &str = "/integration/ai/job-posts/apply";
    pub const JOB_POSTS_VISIBILITY: &str = "/integration/ai/job-posts/visibility";
    pub const JOB_POSTS_APPLIED: &str = "/integration/ai/job-posts/applied";
    pub const APPLICATIONS_PRE_PROCESS: &str = "/integration/ai/applications/pre-process";
    pub const APPLICATIONS_ID: &str = "/integration/ai/applications/{id}";
    pub const APPLICATIONS_ID_PROPOSAL: &str = "/integration/ai/applications/{id}/proposal";
    pub const IMAGES_ANALYZE: &str = "/integration/ai/images/analyze";
    pub const TENANT_API_KEY: &str = "/integration/ai/tenant-api-key";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    /// Built once; decides whether the integration is enabled.
    pub ai: IntegrationAi,
    /// Builds each request's credential overlay from cached tenant settings.
    pub resolver: Arc<CredentialResolver>,
    /// Entity-changed events for the background worker.
    pub events: EventPublisher,
}

impl AppState {
    pub fn new(
        config: ApiConfig,
        lookup: Arc<dyn SettingsLookup>,
        events: EventPublisher,
    ) -> IntegrationResult<Self> {
        let ai = IntegrationAi::from_config(&config.integration)?;
        let ttl_ms = i64::try_from(config.integration.settings_ttl.as_millis()).unwrap_or(i64::MAX);
        let resolver = CredentialResolver::new(
            Arc::new(SettingsCache::with_ttl_ms(lookup, ttl_ms)),
            config.integration.static_credentials(),
            config.integration.provider.clone(),
        );
        Ok(Self {
            config,
            ai,
            resolver: Arc::new(resolver),
            events,
        })
    }

    /// State backed by the Postgres settings store.
    pub fn with_pool(config: ApiConfig, pool: PgPool, events: EventPublisher) -> IntegrationResult<Self> {
        Self::new(config, Arc::new(PgSettingsLookup::new(pool)), events)
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::STATUS, get(status::status_handler).post(status::status_handler))
        .route(routes::EMPLOYEES_SYNC, post(employees::sync_employees_handler))
        .route(routes::EMPLOYEES_STATUS, post(employees::employee_status_handler))
        .route(routes::EMPLOYEES_CRITERIA, post(employees::sync_criteria_handler))
        .route(routes::EMPLOYEES_CHANGED, post(employees::employees_changed_handler))
        .route(routes::CRITERIA_CHANGED, post(employees::criteria_changed_handler))
        .route(routes::TENANTS_SYNC, post(employees::sync_tenant_handler))
        .route(routes::JOB_POSTS_LIST, post(job_posts::list_job_posts_handler))
        .route(routes::JOB_POSTS_APPLY, post(job_posts::apply_handler))
        .route(routes::JOB_POSTS_VISIBILITY, post(job_posts::visibility_handler))
        .route(routes::JOB_POSTS_APPLIED, post(job_posts::applied_handler))
        .route(
            routes::APPLICATIONS_PRE_PROCESS,
            post(applications::pre_process_handler),
        )
        .route(routes::APPLICATIONS_ID, get(applications::get_application_handler))
        .route(
            routes::APPLICATIONS_ID_PROPOSAL,
            post(applications::generate_proposal_handler),
        )
        .route(routes::IMAGES_ANALYZE, post(applications::analyze_image_handler))
        .route(routes::TENANT_API_KEY, post(applications::tenant_api_key_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::context::request_context,
        ))
        .layer(cors)
        .with_state(state)
}
