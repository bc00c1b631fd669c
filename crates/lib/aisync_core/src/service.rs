// @awa-component: INT-Facade
//
//! Integration entry point used by the HTTP layer and the event worker.
//!
//! [`IntegrationAi`] is built once per process. Whether the remote service is
//! configured is decided there and kept as a [`Capability`]; a disabled
//! integration hands out sessions whose operations return empty, `false` or
//! "redirect required" without touching the network.
//!
//! [`AiSession`] binds the shared client to one credential context. Every
//! request, and every concurrently synced unit of work, gets its own.

use std::sync::Arc;

use futures::future::try_join_all;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::IntegrationConfig;
use crate::credentials::{ConfigOverlay, CredentialSet};
use crate::criteria::{CriteriaReplicator, ReplicationSummary};
use crate::error::{IntegrationError, IntegrationResult};
use crate::matching::JobMatchingService;
use crate::models::local::{LocalCriterion, LocalEmployee, LocalTenant};
use crate::models::matching::{
    ApplyInput, ApplyResult, EmployeeJobPost, EmployeeStatusInput, JobPostListQuery, Pagination,
    TenantApiKeyInput, UpdateAppliedResult, VisibilityInput,
};
use crate::models::remote::{ImageAnalysisResult, TenantApiKeyRecord};
use crate::remote::{GraphQlApi, RemoteApi, RemoteClient};
use crate::sync::{EntitySyncEngine, SyncLocks, SyncOutcome};

/// Whether the remote service is configured for this process.
#[derive(Debug, Clone)]
pub enum Capability {
    Disabled,
    Enabled(Arc<RemoteClient>),
}

#[derive(Debug, Clone)]
pub struct IntegrationAi {
    capability: Capability,
    locks: Arc<SyncLocks>,
}

impl IntegrationAi {
    /// Build from configuration. Missing endpoints disable the integration;
    /// any other client construction failure is returned.
    pub fn from_config(config: &IntegrationConfig) -> IntegrationResult<Self> {
        let capability = match RemoteClient::new(config) {
            Ok(client) => {
                info!(
                    graphql = %client.graphql_endpoint(),
                    rest = %client.rest_endpoint(),
                    "ai integration enabled"
                );
                Capability::Enabled(Arc::new(client))
            }
            Err(IntegrationError::ConfigurationMissing) => {
                warn!("ai integration disabled: remote endpoints not configured");
                Capability::Disabled
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            capability,
            locks: Arc::new(SyncLocks::new()),
        })
    }

    pub fn disabled() -> Self {
        Self {
            capability: Capability::Disabled,
            locks: Arc::new(SyncLocks::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.capability, Capability::Enabled(_))
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// A session using `credentials` as the effective set.
    pub fn session(&self, credentials: CredentialSet) -> AiSession {
        let remote: Option<Arc<dyn RemoteApi>> = match &self.capability {
            Capability::Enabled(client) => {
                Some(Arc::new(GraphQlApi::new(client.clone(), credentials)))
            }
            Capability::Disabled => None,
        };
        AiSession {
            remote,
            locks: self.locks.clone(),
        }
    }

    /// A session for whatever the overlay currently resolves to.
    pub fn session_for(&self, overlay: &ConfigOverlay) -> AiSession {
        self.session(overlay.effective())
    }
}

/// Integration operations under one credential context.
#[derive(Clone)]
pub struct AiSession {
    remote: Option<Arc<dyn RemoteApi>>,
    locks: Arc<SyncLocks>,
}

impl AiSession {
    #[cfg(test)]
    pub(crate) fn with_remote(remote: Arc<dyn RemoteApi>, locks: Arc<SyncLocks>) -> Self {
        Self {
            remote: Some(remote),
            locks,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.remote.is_some()
    }

    fn matching<'s>(&'s self, remote: &'s dyn RemoteApi) -> JobMatchingService<'s> {
        JobMatchingService::new(remote, &self.locks)
    }

    // -- sync ---------------------------------------------------------------

    async fn sync_one(&self, remote: &dyn RemoteApi, employee: &LocalEmployee) -> IntegrationResult<SyncOutcome> {
        let engine = EntitySyncEngine::new(remote, &self.locks);
        let user = engine.sync_user(&employee.user_input(true)).await?;
        engine
            .sync_employee(&employee.employee_input(user.remote_id(), true))
            .await
    }

    /// Upsert the owning users, then the employees. Independent employees
    /// are synced concurrently; the first failure is returned.
    pub async fn sync_employees(&self, employees: &[LocalEmployee]) -> IntegrationResult<bool> {
        let Some(remote) = self.remote.as_deref() else {
            return Ok(false);
        };
        let outcomes = try_join_all(employees.iter().map(|e| self.sync_one(remote, e))).await?;
        info!(operation = "sync_employees", count = outcomes.len(), "employees synced");
        Ok(true)
    }

    /// Remote id of the tenant after upserting it.
    pub async fn sync_tenant(&self, tenant: &LocalTenant) -> IntegrationResult<Option<String>> {
        let Some(remote) = self.remote.as_deref() else {
            return Ok(None);
        };
        let outcome = EntitySyncEngine::new(remote, &self.locks)
            .sync_tenant(&tenant.tenant_input())
            .await?;
        Ok(Some(outcome.remote_id().to_string()))
    }

    pub async fn sync_employee_job_search_criteria(
        &self,
        employee: &LocalEmployee,
        criteria: &[LocalCriterion],
    ) -> IntegrationResult<Option<ReplicationSummary>> {
        let Some(remote) = self.remote.as_deref() else {
            return Ok(None);
        };
        CriteriaReplicator::new(remote, &self.locks)
            .replicate(employee, criteria)
            .await
            .map(Some)
    }

    // -- job matching -------------------------------------------------------

    pub async fn apply(&self, input: &ApplyInput) -> IntegrationResult<ApplyResult> {
        match self.remote.as_deref() {
            Some(remote) => self.matching(remote).apply(input).await,
            None => Ok(ApplyResult::redirect()),
        }
    }

    pub async fn update_visibility(&self, input: &VisibilityInput) -> IntegrationResult<bool> {
        match self.remote.as_deref() {
            Some(remote) => self.matching(remote).update_visibility(input).await,
            None => Ok(false),
        }
    }

    pub async fn update_applied(&self, input: &ApplyInput) -> IntegrationResult<UpdateAppliedResult> {
        match self.remote.as_deref() {
            Some(remote) => self.matching(remote).update_applied(input).await,
            None => Ok(UpdateAppliedResult {
                is_redirect_required: true,
            }),
        }
    }

    pub async fn update_employee_status(&self, input: &EmployeeStatusInput) -> IntegrationResult<bool> {
        match self.remote.as_deref() {
            Some(remote) => self.matching(remote).update_employee_status(input).await,
            None => Ok(false),
        }
    }

    pub async fn employee_job_posts(
        &self,
        query: &JobPostListQuery,
    ) -> IntegrationResult<Pagination<EmployeeJobPost>> {
        match self.remote.as_deref() {
            Some(remote) => self.matching(remote).list_employee_job_posts(query).await,
            None => Ok(Pagination::empty()),
        }
    }

    // -- application workflow ------------------------------------------------

    pub async fn pre_process_employee_job_application(
        &self,
        input: &ApplyInput,
    ) -> IntegrationResult<Option<Value>> {
        match self.remote.as_deref() {
            Some(remote) => self.matching(remote).pre_process(input).await,
            None => Ok(None),
        }
    }

    pub async fn generate_proposal(&self, application_id: &str) -> IntegrationResult<Option<Value>> {
        match self.remote.as_deref() {
            Some(remote) => self.matching(remote).generate_proposal(application_id).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn get_employee_job_application(
        &self,
        application_id: &str,
    ) -> IntegrationResult<Option<Value>> {
        match self.remote.as_deref() {
            Some(remote) => self.matching(remote).get_application(application_id).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn analyze_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> IntegrationResult<Vec<ImageAnalysisResult>> {
        match self.remote.as_deref() {
            Some(remote) => self.matching(remote).analyze_image(bytes, filename).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn update_tenant_api_key(
        &self,
        input: &TenantApiKeyInput,
    ) -> IntegrationResult<Option<TenantApiKeyRecord>> {
        match self.remote.as_deref() {
            Some(remote) => self.matching(remote).update_tenant_api_key(input).await,
            None => Ok(None),
        }
    }

    /// Total remote employee count. Fails when the integration is disabled.
    pub async fn probe(&self) -> IntegrationResult<u64> {
        let remote = self
            .remote
            .as_deref()
            .ok_or(IntegrationError::ConfigurationMissing)?;
        remote.count_employees().await
    }
}
