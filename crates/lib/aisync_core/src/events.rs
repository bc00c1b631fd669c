// @awa-component: INT-EventWorker
//
//! Entity-changed notifications and the worker that syncs them.
//!
//! Each event carries its tenant and organization so the worker can build
//! a credential context for that event alone.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{IntegrationError, IntegrationResult};
use crate::models::local::{LocalCriterion, LocalEmployee};
use crate::service::IntegrationAi;
use crate::settings::resolver::CredentialResolver;

pub const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationEvent {
    EmployeesChanged {
        tenant_id: String,
        organization_id: String,
        employees: Vec<LocalEmployee>,
    },
    CriteriaChanged {
        tenant_id: String,
        organization_id: String,
        employee: LocalEmployee,
        /// The complete desired set.
        criteria: Vec<LocalCriterion>,
    },
}

impl IntegrationEvent {
    pub fn name(&self) -> &'static str {
        match self {
            IntegrationEvent::EmployeesChanged { .. } => "employees_changed",
            IntegrationEvent::CriteriaChanged { .. } => "criteria_changed",
        }
    }

    fn scope(&self) -> (&str, &str) {
        match self {
            IntegrationEvent::EmployeesChanged {
                tenant_id,
                organization_id,
                ..
            }
            | IntegrationEvent::CriteriaChanged {
                tenant_id,
                organization_id,
                ..
            } => (tenant_id, organization_id),
        }
    }
}

/// Sending half handed to whatever publishes entity changes.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: mpsc::Sender<IntegrationEvent>,
}

impl EventPublisher {
    /// Queue an event. Returns `false` when the worker has stopped.
    pub async fn publish(&self, event: IntegrationEvent) -> bool {
        let name = event.name();
        match self.tx.send(event).await {
            Ok(()) => true,
            Err(_) => {
                warn!(event = name, "event worker stopped, event dropped");
                false
            }
        }
    }
}

pub fn channel(capacity: usize) -> (EventPublisher, mpsc::Receiver<IntegrationEvent>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (EventPublisher { tx }, rx)
}

pub struct EventWorker {
    ai: IntegrationAi,
    resolver: Arc<CredentialResolver>,
    rx: mpsc::Receiver<IntegrationEvent>,
}

impl EventWorker {
    pub fn new(
        ai: IntegrationAi,
        resolver: Arc<CredentialResolver>,
        rx: mpsc::Receiver<IntegrationEvent>,
    ) -> Self {
        Self { ai, resolver, rx }
    }

    /// Process events until every publisher is dropped.
    ///
    /// A failed event is logged and skipped; the next change for the same
    /// entity triggers another attempt. Unlike HTTP requests, an event whose
    /// settings lookup fails is not synced under the default credentials.
    pub async fn run(mut self) {
        info!("integration event worker started");
        while let Some(event) = self.rx.recv().await {
            let name = event.name();
            let (tenant_id, organization_id) = event.scope();
            match self.handle(&event).await {
                Ok(()) => {}
                Err(IntegrationError::Settings(e)) => warn!(
                    event = name,
                    tenant_id,
                    organization_id,
                    error = %e,
                    "settings lookup failed, event dropped"
                ),
                Err(e) => warn!(
                    event = name,
                    tenant_id,
                    organization_id,
                    error = %e,
                    "event sync failed"
                ),
            }
        }
        info!("integration event worker stopped");
    }

    pub async fn handle(&self, event: &IntegrationEvent) -> IntegrationResult<()> {
        if !self.ai.is_enabled() {
            debug!(event = event.name(), "integration disabled, event ignored");
            return Ok(());
        }

        let (tenant_id, organization_id) = event.scope();
        let overlay = self
            .resolver
            .overlay_for(Some(tenant_id), Some(organization_id))
            .await?;
        let session = self.ai.session_for(&overlay);

        match event {
            IntegrationEvent::EmployeesChanged { employees, .. } => {
                session.sync_employees(employees).await?;
            }
            IntegrationEvent::CriteriaChanged {
                employee, criteria, ..
            } => {
                session
                    .sync_employee_job_search_criteria(employee, criteria)
                    .await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialSet;
    use crate::settings::cache::SettingsCache;
    use crate::settings::{SettingRow, SettingsError, SettingsLookup};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct CountingLookup {
        calls: AtomicU32,
    }

    #[async_trait]
    impl SettingsLookup for CountingLookup {
        async fn lookup(
            &self,
            _tenant_id: &str,
            _organization_id: &str,
            _provider: &str,
        ) -> Result<Option<Vec<SettingRow>>, SettingsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    fn employees_changed() -> IntegrationEvent {
        IntegrationEvent::EmployeesChanged {
            tenant_id: "t1".into(),
            organization_id: "o1".into(),
            employees: vec![LocalEmployee::default()],
        }
    }

    #[tokio::test]
    async fn publish_fails_once_worker_is_gone() {
        let (publisher, rx) = channel(4);
        drop(rx);
        assert!(!publisher.publish(employees_changed()).await);
    }

    #[tokio::test]
    async fn disabled_worker_drains_without_lookups() {
        let lookup = Arc::new(CountingLookup::default());
        let resolver = Arc::new(CredentialResolver::new(
            Arc::new(SettingsCache::new(lookup.clone())),
            CredentialSet::default(),
            "ai",
        ));
        let (publisher, rx) = channel(4);
        let worker = tokio::spawn(EventWorker::new(IntegrationAi::disabled(), resolver, rx).run());

        assert!(publisher.publish(employees_changed()).await);
        drop(publisher);
        worker.await.unwrap();

        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    struct FailingLookup;

    #[async_trait]
    impl SettingsLookup for FailingLookup {
        async fn lookup(
            &self,
            _tenant_id: &str,
            _organization_id: &str,
            _provider: &str,
        ) -> Result<Option<Vec<SettingRow>>, SettingsError> {
            Err(SettingsError::Db(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn settings_failure_surfaces_as_settings_error() {
        let ai = IntegrationAi::from_config(&crate::config::IntegrationConfig {
            graphql_endpoint: Some("http://127.0.0.1:1/graphql".into()),
            rest_endpoint: Some("http://127.0.0.1:1/api".into()),
            ..crate::config::IntegrationConfig::default()
        })
        .unwrap();
        let resolver = Arc::new(CredentialResolver::new(
            Arc::new(SettingsCache::new(Arc::new(FailingLookup))),
            CredentialSet::default(),
            "ai",
        ));
        let (_publisher, rx) = channel(1);
        let worker = EventWorker::new(ai, resolver, rx);

        let err = worker.handle(&employees_changed()).await.unwrap_err();
        assert!(matches!(err, IntegrationError::Settings(_)));
    }

    #[test]
    fn event_names() {
        assert_eq!(employees_changed().name(), "employees_changed");
        assert_eq!(employees_changed().scope(), ("t1", "o1"));
    }
}
