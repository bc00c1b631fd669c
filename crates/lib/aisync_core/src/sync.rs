// @awa-component: INT-EntitySync
//
//! Upsert-by-search for users, employees and tenants.
//!
//! The remote service has no atomic upsert. Each sync searches by external
//! id first, then by name, and creates only when both searches come back
//! empty. An external-id match always wins over a name match.
//!
//! Search-then-act is not transactional. Within one process, [`SyncLocks`]
//! serializes syncs of the same entity; two processes can still race.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};

use crate::error::{IntegrationError, IntegrationResult};
use crate::models::remote::{EmployeeInput, TenantInput, UserInput};
use crate::remote::RemoteApi;

/// Kind of a synced entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Employee,
    Tenant,
    JobPost,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::User => "user",
            EntityKind::Employee => "employee",
            EntityKind::Tenant => "tenant",
            EntityKind::JobPost => "job_post",
        })
    }
}

/// Local id ↔ remote id for one entity. Never persisted; resolved per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIdentity {
    pub kind: EntityKind,
    /// The local id, `externalId` from the remote's point of view.
    pub local_id: String,
    pub remote_id: String,
}

/// How a sync found its remote record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedBy {
    ExternalId,
    Name,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub identity: RemoteIdentity,
    pub matched_by: MatchedBy,
}

impl SyncOutcome {
    pub fn remote_id(&self) -> &str {
        &self.identity.remote_id
    }
}

// ---------------------------------------------------------------------------
// Locks
// ---------------------------------------------------------------------------

/// Per-entity async locks keyed by kind and external id.
#[derive(Debug, Default)]
pub struct SyncLocks {
    inner: DashMap<(EntityKind, String), Arc<Mutex<()>>>,
}

/// Held while one entity is being synced. Releasing the last holder drops the entry.
pub struct SyncGuard<'a> {
    locks: &'a SyncLocks,
    key: (EntityKind, String),
    guard: Option<OwnedMutexGuard<()>>,
}

impl SyncLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, kind: EntityKind, external_id: &str) -> SyncGuard<'_> {
        let key = (kind, external_id.to_string());
        let mutex = self.inner.entry(key.clone()).or_default().clone();
        let guard = mutex.lock_owned().await;
        SyncGuard {
            locks: self,
            key,
            guard: Some(guard),
        }
    }

    /// Number of keys currently held or awaited.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks
            .inner
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

fn required<'v>(value: &'v Option<String>, what: &str) -> IntegrationResult<&'v str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| IntegrationError::Validation(format!("{what} is required")))
}

fn name_pair<'v>(first: &'v Option<String>, last: &'v Option<String>) -> Option<(&'v str, &'v str)> {
    match (first.as_deref(), last.as_deref()) {
        (Some(f), Some(l)) if !f.is_empty() && !l.is_empty() => Some((f, l)),
        _ => None,
    }
}

/// Upsert-by-search over a [`RemoteApi`].
pub struct EntitySyncEngine<'a> {
    remote: &'a dyn RemoteApi,
    locks: &'a SyncLocks,
}

impl<'a> EntitySyncEngine<'a> {
    pub fn new(remote: &'a dyn RemoteApi, locks: &'a SyncLocks) -> Self {
        Self { remote, locks }
    }

    pub fn remote(&self) -> &'a dyn RemoteApi {
        self.remote
    }

    /// Sync a user. Searched by (externalUserId, externalTenantId), then by name.
    pub async fn sync_user(&self, input: &UserInput) -> IntegrationResult<SyncOutcome> {
        let external_user_id = required(&input.external_user_id, "externalUserId")?;
        let external_tenant_id = required(&input.external_tenant_id, "externalTenantId")?;
        let _guard = self.locks.lock(EntityKind::User, external_user_id).await;

        let mut found = self
            .remote
            .find_users_by_external_id(external_user_id, external_tenant_id)
            .await?
            .into_first()
            .map(|u| (u.id, MatchedBy::ExternalId));

        if found.is_none() {
            if let Some((first, last)) = name_pair(&input.first_name, &input.last_name) {
                found = self
                    .remote
                    .find_users_by_name(first, last)
                    .await?
                    .into_first()
                    .map(|u| (u.id, MatchedBy::Name));
            }
        }

        let (remote_id, matched_by) = match found {
            Some((id, matched_by)) => {
                self.remote.update_user(&id, input).await?;
                (id, matched_by)
            }
            None => (self.remote.create_user(input).await?.id, MatchedBy::Created),
        };

        info!(
            operation = "sync_user",
            external_id = %external_user_id,
            remote_id = %remote_id,
            matched_by = ?matched_by,
            "user synced"
        );
        Ok(SyncOutcome {
            identity: RemoteIdentity {
                kind: EntityKind::User,
                local_id: external_user_id.to_string(),
                remote_id,
            },
            matched_by,
        })
    }

    /// Sync an employee. Searched by externalEmployeeId, then by first+last name.
    pub async fn sync_employee(&self, input: &EmployeeInput) -> IntegrationResult<SyncOutcome> {
        let external_employee_id = required(&input.external_employee_id, "externalEmployeeId")?;
        let _guard = self
            .locks
            .lock(EntityKind::Employee, external_employee_id)
            .await;

        let mut found = self
            .remote
            .find_employees_by_external_id(external_employee_id)
            .await?
            .into_first()
            .map(|e| (e.id, MatchedBy::ExternalId));
        debug!(
            external_id = %external_employee_id,
            found = found.is_some(),
            "employee searched by external id"
        );

        if found.is_none() {
            if let Some((first, last)) = name_pair(&input.first_name, &input.last_name) {
                found = self
                    .remote
                    .find_employees_by_name(first, last)
                    .await?
                    .into_first()
                    .map(|e| (e.id, MatchedBy::Name));
            }
        }

        let (remote_id, matched_by) = match found {
            Some((id, matched_by)) => {
                self.remote.update_employee(&id, input).await?;
                (id, matched_by)
            }
            None => (
                self.remote.create_employee(input).await?.id,
                MatchedBy::Created,
            ),
        };

        info!(
            operation = "sync_employee",
            external_id = %external_employee_id,
            remote_id = %remote_id,
            matched_by = ?matched_by,
            "employee synced"
        );
        Ok(SyncOutcome {
            identity: RemoteIdentity {
                kind: EntityKind::Employee,
                local_id: external_employee_id.to_string(),
                remote_id,
            },
            matched_by,
        })
    }

    /// Sync a tenant. Searched by externalTenantId, then by name.
    pub async fn sync_tenant(&self, input: &TenantInput) -> IntegrationResult<SyncOutcome> {
        let external_tenant_id = required(&input.external_tenant_id, "externalTenantId")?;
        let _guard = self.locks.lock(EntityKind::Tenant, external_tenant_id).await;

        let mut found = self
            .remote
            .find_tenants_by_external_id(external_tenant_id)
            .await?
            .into_first()
            .map(|t| (t.id, MatchedBy::ExternalId));

        if found.is_none() {
            if let Some(name) = input.name.as_deref().filter(|n| !n.is_empty()) {
                found = self
                    .remote
                    .find_tenants_by_name(name)
                    .await?
                    .into_first()
                    .map(|t| (t.id, MatchedBy::Name));
            }
        }

        let (remote_id, matched_by) = match found {
            Some((id, matched_by)) => {
                self.remote.update_tenant(&id, input).await?;
                (id, matched_by)
            }
            None => (self.remote.create_tenant(input).await?.id, MatchedBy::Created),
        };

        info!(
            operation = "sync_tenant",
            external_id = %external_tenant_id,
            remote_id = %remote_id,
            matched_by = ?matched_by,
            "tenant synced"
        );
        Ok(SyncOutcome {
            identity: RemoteIdentity {
                kind: EntityKind::Tenant,
                local_id: external_tenant_id.to_string(),
                remote_id,
            },
            matched_by,
        })
    }

    /// Remote employee id by exact external-id match. Never creates.
    pub async fn find_employee_id(&self, external_employee_id: &str) -> IntegrationResult<Option<String>> {
        if external_employee_id.is_empty() {
            return Ok(None);
        }
        Ok(self
            .remote
            .find_employees_by_external_id(external_employee_id)
            .await?
            .into_first()
            .map(|e| e.id))
    }

    /// Remote tenant id by exact external-id match. Never creates.
    pub async fn find_tenant_id(&self, external_tenant_id: &str) -> IntegrationResult<Option<String>> {
        if external_tenant_id.is_empty() {
            return Ok(None);
        }
        Ok(self
            .remote
            .find_tenants_by_external_id(external_tenant_id)
            .await?
            .into_first()
            .map(|t| t.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeRemote;

    fn employee(external_id: &str, first: &str, last: &str) -> EmployeeInput {
        EmployeeInput {
            external_employee_id: Some(external_id.into()),
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            is_active: Some(true),
            ..EmployeeInput::default()
        }
    }

    #[tokio::test]
    async fn employee_sync_creates_once_then_updates_same_record() {
        let remote = FakeRemote::new();
        let locks = SyncLocks::new();
        let engine = EntitySyncEngine::new(&remote, &locks);

        let first = engine
            .sync_employee(&employee("emp-1", "Ada", "Lovelace"))
            .await
            .unwrap();
        assert_eq!(first.matched_by, MatchedBy::Created);

        let mut changed = employee("emp-1", "Ada", "King");
        changed.linked_in_id = Some("ada".into());
        let second = engine.sync_employee(&changed).await.unwrap();

        assert_eq!(second.matched_by, MatchedBy::ExternalId);
        assert_eq!(first.remote_id(), second.remote_id());
        assert_eq!(remote.employee_count(), 1);
        let stored = remote.employee(first.remote_id()).unwrap();
        assert_eq!(stored.last_name.as_deref(), Some("King"));
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn external_id_match_wins_over_name_match() {
        let remote = FakeRemote::new();
        let by_name = remote.seed_employee(None, "Ada", "Lovelace");
        let by_external = remote.seed_employee(Some("emp-1"), "Someone", "Else");
        let locks = SyncLocks::new();
        let engine = EntitySyncEngine::new(&remote, &locks);

        let outcome = engine
            .sync_employee(&employee("emp-1", "Ada", "Lovelace"))
            .await
            .unwrap();

        assert_eq!(outcome.remote_id(), by_external);
        assert_ne!(outcome.remote_id(), by_name);
        assert_eq!(outcome.matched_by, MatchedBy::ExternalId);
        assert_eq!(remote.employee_count(), 2);
    }

    #[tokio::test]
    async fn name_match_is_adopted_when_external_id_is_unknown() {
        let remote = FakeRemote::new();
        let seeded = remote.seed_employee(None, "Ada", "Lovelace");
        let locks = SyncLocks::new();
        let engine = EntitySyncEngine::new(&remote, &locks);

        let outcome = engine
            .sync_employee(&employee("emp-9", "Ada", "Lovelace"))
            .await
            .unwrap();

        assert_eq!(outcome.matched_by, MatchedBy::Name);
        assert_eq!(outcome.remote_id(), seeded);
        assert_eq!(
            remote.employee(&seeded).unwrap().external_employee_id.as_deref(),
            Some("emp-9")
        );
        assert_eq!(remote.employee_count(), 1);
    }

    #[tokio::test]
    async fn concurrent_syncs_of_one_employee_create_one_record() {
        let remote = FakeRemote::new();
        let locks = SyncLocks::new();
        let engine = EntitySyncEngine::new(&remote, &locks);
        let input = employee("emp-1", "Ada", "Lovelace");

        let (a, b) = tokio::join!(engine.sync_employee(&input), engine.sync_employee(&input));

        assert_eq!(a.unwrap().remote_id(), b.unwrap().remote_id());
        assert_eq!(remote.employee_count(), 1);
    }

    #[tokio::test]
    async fn missing_external_id_is_a_validation_error() {
        let remote = FakeRemote::new();
        let locks = SyncLocks::new();
        let engine = EntitySyncEngine::new(&remote, &locks);

        let err = engine
            .sync_employee(&EmployeeInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, IntegrationError::Validation(_)));
        assert_eq!(remote.mutation_count(), 0);
    }

    #[tokio::test]
    async fn user_and_tenant_sync_are_idempotent() {
        let remote = FakeRemote::new();
        let locks = SyncLocks::new();
        let engine = EntitySyncEngine::new(&remote, &locks);

        let user = UserInput {
            external_user_id: Some("user-1".into()),
            external_tenant_id: Some("t1".into()),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            ..UserInput::default()
        };
        let u1 = engine.sync_user(&user).await.unwrap();
        let u2 = engine.sync_user(&user).await.unwrap();
        assert_eq!(u1.remote_id(), u2.remote_id());
        assert_eq!(remote.user_count(), 1);

        let tenant = TenantInput {
            external_tenant_id: Some("t1".into()),
            name: Some("Acme".into()),
            ..TenantInput::default()
        };
        let t1 = engine.sync_tenant(&tenant).await.unwrap();
        let t2 = engine.sync_tenant(&tenant).await.unwrap();
        assert_eq!(t1.remote_id(), t2.remote_id());
        assert_eq!(t2.matched_by, MatchedBy::ExternalId);
        assert_eq!(remote.tenant_count(), 1);
    }

    #[tokio::test]
    async fn find_ids_never_create() {
        let remote = FakeRemote::new();
        let locks = SyncLocks::new();
        let engine = EntitySyncEngine::new(&remote, &locks);

        assert_eq!(engine.find_employee_id("nobody").await.unwrap(), None);
        assert_eq!(engine.find_tenant_id("").await.unwrap(), None);
        assert_eq!(remote.mutation_count(), 0);
    }
}
