// @awa-component: INT-CriteriaReplicator
//
//! Full-replace sync of an employee's job-search criteria.
//!
//! Callers must pass the complete desired set every time. Anything missing
//! from `criteria` is deleted remotely.

use tracing::info;

use crate::error::IntegrationResult;
use crate::models::local::{LocalCriterion, LocalEmployee};
use crate::models::remote::CriterionInput;
use crate::sync::{EntitySyncEngine, SyncLocks};

/// Result of one replication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationSummary {
    pub remote_employee_id: String,
    pub deleted: u64,
    pub created: usize,
}

pub struct CriteriaReplicator<'a> {
    engine: EntitySyncEngine<'a>,
}

impl<'a> CriteriaReplicator<'a> {
    pub fn new(remote: &'a dyn crate::remote::RemoteApi, locks: &'a SyncLocks) -> Self {
        Self {
            engine: EntitySyncEngine::new(remote, locks),
        }
    }

    pub async fn replicate(
        &self,
        employee: &LocalEmployee,
        criteria: &[LocalCriterion],
    ) -> IntegrationResult<ReplicationSummary> {
        let user = self.engine.sync_user(&employee.user_input(false)).await?;
        let synced = self
            .engine
            .sync_employee(&employee.employee_input(user.remote_id(), false))
            .await?;
        let remote_employee_id = synced.remote_id().to_string();

        let remote = self.engine.remote();
        let deleted = remote.delete_criteria(&remote_employee_id).await?;

        let rows: Vec<CriterionInput> = criteria
            .iter()
            .map(|c| c.to_remote(&remote_employee_id))
            .collect();
        let created = if rows.is_empty() {
            0
        } else {
            remote.create_criteria(&rows).await?.len()
        };

        info!(
            operation = "replicate_criteria",
            employee_id = %employee.id,
            remote_employee_id = %remote_employee_id,
            deleted,
            created,
            "criteria replaced"
        );
        Ok(ReplicationSummary {
            remote_employee_id,
            deleted,
            created,
        })
    }
}
