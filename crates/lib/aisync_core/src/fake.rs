//! In-memory [`RemoteApi`] used by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{IntegrationError, IntegrationResult};
use crate::models::remote::{
    Connection, CriterionInput, EmployeeInput, EmployeeJobApplicationInput, EmployeeJobPostNode,
    EmployeeJobPostUpdate, EmployeeRecord, EmployeeRef, IdRecord, ImageAnalysisData,
    ImageAnalysisResult, PageInfo, TenantApiKeyRecord, TenantApiKeyUpdate, TenantInput,
    TenantRecord, UserInput, UserRecord,
};
use crate::remote::{Comparison, EmployeeJobPostFilter, QueryParams, RemoteApi};

#[derive(Debug, Clone, Default)]
pub struct FakeLink {
    pub id: String,
    pub employee_id: String,
    pub job_post_id: String,
    pub is_active: bool,
    pub is_archived: bool,
    pub is_applied: bool,
}

#[derive(Debug, Clone)]
pub struct RestCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    users: Vec<UserRecord>,
    employees: Vec<EmployeeRecord>,
    tenants: Vec<TenantRecord>,
    job_posts: Vec<(String, String, String)>,
    links: Vec<FakeLink>,
    listing: Vec<EmployeeJobPostNode>,
    applications: Vec<EmployeeJobApplicationInput>,
    criteria: Vec<(String, CriterionInput)>,
    api_keys: Vec<(String, String, TenantApiKeyUpdate)>,
    rest_calls: Vec<RestCall>,
    page_filters: Vec<EmployeeJobPostFilter>,
    mutations: usize,
    unreachable: bool,
    omit_end_cursor: bool,
}

impl State {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

fn merge(target: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

/// Remote store kept in memory with call counters.
#[derive(Default)]
pub struct FakeRemote {
    state: Mutex<State>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    /// Suspend like a network call would, then fail if marked unreachable.
    async fn call(&self) -> IntegrationResult<()> {
        tokio::task::yield_now().await;
        if self.with(|s| s.unreachable) {
            return Err(IntegrationError::Unreachable("fake remote is down".into()));
        }
        Ok(())
    }

    async fn mutate(&self) -> IntegrationResult<()> {
        self.call().await?;
        self.with(|s| s.mutations += 1);
        Ok(())
    }

    // -- setup ----------------------------------------------------------

    pub fn set_unreachable(&self, unreachable: bool) {
        self.with(|s| s.unreachable = unreachable);
    }

    /// Report `hasNextPage` pages with a null `endCursor`.
    pub fn omit_end_cursor(&self, omit: bool) {
        self.with(|s| s.omit_end_cursor = omit);
    }

    pub fn seed_employee(&self, external_id: Option<&str>, first: &str, last: &str) -> String {
        self.with(|s| {
            let id = s.id("re");
            s.employees.push(EmployeeRecord {
                id: id.clone(),
                external_employee_id: external_id.map(str::to_string),
                first_name: Some(first.into()),
                last_name: Some(last.into()),
                ..EmployeeRecord::default()
            });
            id
        })
    }

    pub fn seed_tenant(&self, external_id: &str, name: &str) -> String {
        self.with(|s| {
            let id = s.id("rt");
            s.tenants.push(TenantRecord {
                id: id.clone(),
                name: Some(name.into()),
                external_tenant_id: Some(external_id.into()),
                ..TenantRecord::default()
            });
            id
        })
    }

    pub fn seed_job_post(&self, provider_code: &str, provider_job_id: &str) -> String {
        self.with(|s| {
            let id = s.id("jp");
            s.job_posts
                .push((id.clone(), provider_code.into(), provider_job_id.into()));
            id
        })
    }

    pub fn seed_link(&self, employee_id: &str, job_post_id: &str) -> String {
        self.with(|s| {
            let id = s.id("link");
            s.links.push(FakeLink {
                id: id.clone(),
                employee_id: employee_id.into(),
                job_post_id: job_post_id.into(),
                is_active: true,
                ..FakeLink::default()
            });
            id
        })
    }

    /// `count` listing rows `row-0..row-{count-1}`, already in server order.
    pub fn seed_listing(&self, count: usize, employee: Option<(&str, &str)>) {
        self.with(|s| {
            for i in 0..count {
                s.listing.push(EmployeeJobPostNode {
                    id: format!("row-{i}"),
                    is_active: true,
                    employee: employee.map(|(id, ext)| EmployeeRef {
                        id: id.into(),
                        external_employee_id: Some(ext.into()),
                    }),
                    ..EmployeeJobPostNode::default()
                });
            }
        })
    }

    pub fn seed_criteria(&self, employee_id: &str, keywords: &[&str]) {
        self.with(|s| {
            for keyword in keywords {
                let id = s.id("crit");
                s.criteria.push((
                    id,
                    CriterionInput {
                        employee_id: employee_id.into(),
                        is_active: true,
                        keyword: keyword.to_string(),
                        job_type: "hourly".into(),
                        ..CriterionInput::default()
                    },
                ));
            }
        })
    }

    pub fn seed_tenant_api_key(&self, api_key: &str) -> String {
        self.with(|s| {
            let id = s.id("key");
            s.api_keys
                .push((id.clone(), api_key.into(), TenantApiKeyUpdate::default()));
            id
        })
    }

    // -- inspection -----------------------------------------------------

    pub fn employee(&self, id: &str) -> Option<EmployeeRecord> {
        self.with(|s| s.employees.iter().find(|e| e.id == id).cloned())
    }

    pub fn employee_count(&self) -> usize {
        self.with(|s| s.employees.len())
    }

    pub fn user_count(&self) -> usize {
        self.with(|s| s.users.len())
    }

    pub fn tenant_count(&self) -> usize {
        self.with(|s| s.tenants.len())
    }

    pub fn link(&self, id: &str) -> Option<FakeLink> {
        self.with(|s| s.links.iter().find(|l| l.id == id).cloned())
    }

    pub fn criteria_for(&self, employee_id: &str) -> Vec<String> {
        self.with(|s| {
            s.criteria
                .iter()
                .filter(|(_, c)| c.employee_id == employee_id)
                .map(|(_, c)| c.keyword.clone())
                .collect()
        })
    }

    pub fn applications(&self) -> Vec<EmployeeJobApplicationInput> {
        self.with(|s| s.applications.clone())
    }

    pub fn api_key_update(&self, id: &str) -> Option<TenantApiKeyUpdate> {
        self.with(|s| {
            s.api_keys
                .iter()
                .find(|(key_id, _, _)| key_id == id)
                .map(|(_, _, u)| u.clone())
        })
    }

    pub fn rest_calls(&self) -> Vec<RestCall> {
        self.with(|s| s.rest_calls.clone())
    }

    pub fn page_calls(&self) -> usize {
        self.with(|s| s.page_filters.len())
    }

    pub fn last_filter(&self) -> Option<EmployeeJobPostFilter> {
        self.with(|s| s.page_filters.last().cloned())
    }

    pub fn mutation_count(&self) -> usize {
        self.with(|s| s.mutations)
    }
}

#[async_trait]
impl RemoteApi for FakeRemote {
    async fn find_users_by_external_id(
        &self,
        external_user_id: &str,
        external_tenant_id: &str,
    ) -> IntegrationResult<Connection<UserRecord>> {
        self.call().await?;
        Ok(self.with(|s| {
            Connection::from_nodes(
                s.users
                    .iter()
                    .filter(|u| {
                        u.external_user_id.as_deref() == Some(external_user_id)
                            && u.external_tenant_id.as_deref() == Some(external_tenant_id)
                    })
                    .cloned()
                    .collect(),
            )
        }))
    }

    async fn find_users_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> IntegrationResult<Connection<UserRecord>> {
        self.call().await?;
        Ok(self.with(|s| {
            Connection::from_nodes(
                s.users
                    .iter()
                    .filter(|u| {
                        u.first_name.as_deref() == Some(first_name)
                            && u.last_name.as_deref() == Some(last_name)
                    })
                    .cloned()
                    .collect(),
            )
        }))
    }

    async fn create_user(&self, input: &UserInput) -> IntegrationResult<UserRecord> {
        self.mutate().await?;
        Ok(self.with(|s| {
            let record = UserRecord {
                id: s.id("ru"),
                first_name: input.first_name.clone(),
                last_name: input.last_name.clone(),
                email: input.email.clone(),
                username: input.username.clone(),
                external_tenant_id: input.external_tenant_id.clone(),
                external_user_id: input.external_user_id.clone(),
                is_active: input.is_active,
                is_archived: input.is_archived,
            };
            s.users.push(record.clone());
            record
        }))
    }

    async fn update_user(&self, id: &str, input: &UserInput) -> IntegrationResult<()> {
        self.mutate().await?;
        self.with(|s| {
            if let Some(u) = s.users.iter_mut().find(|u| u.id == id) {
                merge(&mut u.first_name, &input.first_name);
                merge(&mut u.last_name, &input.last_name);
                merge(&mut u.external_user_id, &input.external_user_id);
                merge(&mut u.external_tenant_id, &input.external_tenant_id);
            }
        });
        Ok(())
    }

    async fn find_employees_by_external_id(
        &self,
        external_employee_id: &str,
    ) -> IntegrationResult<Connection<EmployeeRecord>> {
        self.call().await?;
        Ok(self.with(|s| {
            Connection::from_nodes(
                s.employees
                    .iter()
                    .filter(|e| e.external_employee_id.as_deref() == Some(external_employee_id))
                    .cloned()
                    .collect(),
            )
        }))
    }

    async fn find_employees_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> IntegrationResult<Connection<EmployeeRecord>> {
        self.call().await?;
        Ok(self.with(|s| {
            Connection::from_nodes(
                s.employees
                    .iter()
                    .filter(|e| {
                        e.first_name.as_deref() == Some(first_name)
                            && e.last_name.as_deref() == Some(last_name)
                    })
                    .cloned()
                    .collect(),
            )
        }))
    }

    async fn create_employee(&self, input: &EmployeeInput) -> IntegrationResult<EmployeeRecord> {
        self.mutate().await?;
        Ok(self.with(|s| {
            let record = EmployeeRecord {
                id: s.id("re"),
                external_employee_id: input.external_employee_id.clone(),
                external_tenant_id: input.external_tenant_id.clone(),
                external_org_id: input.external_org_id.clone(),
                first_name: input.first_name.clone(),
                last_name: input.last_name.clone(),
                user_id: input.user_id.clone(),
                is_active: input.is_active,
                is_archived: input.is_archived,
            };
            s.employees.push(record.clone());
            record
        }))
    }

    async fn update_employee(&self, id: &str, input: &EmployeeInput) -> IntegrationResult<()> {
        self.mutate().await?;
        self.with(|s| {
            if let Some(e) = s.employees.iter_mut().find(|e| e.id == id) {
                merge(&mut e.external_employee_id, &input.external_employee_id);
                merge(&mut e.external_tenant_id, &input.external_tenant_id);
                merge(&mut e.external_org_id, &input.external_org_id);
                merge(&mut e.first_name, &input.first_name);
                merge(&mut e.last_name, &input.last_name);
                merge(&mut e.user_id, &input.user_id);
                if input.is_active.is_some() {
                    e.is_active = input.is_active;
                }
                if input.is_archived.is_some() {
                    e.is_archived = input.is_archived;
                }
            }
        });
        Ok(())
    }

    async fn count_employees(&self) -> IntegrationResult<u64> {
        self.call().await?;
        Ok(self.with(|s| s.employees.len() as u64))
    }

    async fn find_tenants_by_external_id(
        &self,
        external_tenant_id: &str,
    ) -> IntegrationResult<Connection<TenantRecord>> {
        self.call().await?;
        Ok(self.with(|s| {
            Connection::from_nodes(
                s.tenants
                    .iter()
                    .filter(|t| t.external_tenant_id.as_deref() == Some(external_tenant_id))
                    .cloned()
                    .collect(),
            )
        }))
    }

    async fn find_tenants_by_name(&self, name: &str) -> IntegrationResult<Connection<TenantRecord>> {
        self.call().await?;
        Ok(self.with(|s| {
            Connection::from_nodes(
                s.tenants
                    .iter()
                    .filter(|t| t.name.as_deref() == Some(name))
                    .cloned()
                    .collect(),
            )
        }))
    }

    async fn create_tenant(&self, input: &TenantInput) -> IntegrationResult<TenantRecord> {
        self.mutate().await?;
        Ok(self.with(|s| {
            let record = TenantRecord {
                id: s.id("rt"),
                name: input.name.clone(),
                external_tenant_id: input.external_tenant_id.clone(),
                is_active: input.is_active,
                is_archived: input.is_archived,
            };
            s.tenants.push(record.clone());
            record
        }))
    }

    async fn update_tenant(&self, id: &str, input: &TenantInput) -> IntegrationResult<()> {
        self.mutate().await?;
        self.with(|s| {
            if let Some(t) = s.tenants.iter_mut().find(|t| t.id == id) {
                merge(&mut t.name, &input.name);
                merge(&mut t.external_tenant_id, &input.external_tenant_id);
            }
        });
        Ok(())
    }

    async fn find_job_posts(
        &self,
        provider_code: &str,
        provider_job_id: &str,
    ) -> IntegrationResult<Connection<IdRecord>> {
        self.call().await?;
        Ok(self.with(|s| {
            Connection::from_nodes(
                s.job_posts
                    .iter()
                    .filter(|(_, code, job_id)| code == provider_code && job_id == provider_job_id)
                    .map(|(id, _, _)| IdRecord { id: id.clone() })
                    .collect(),
            )
        }))
    }

    async fn find_employee_job_posts(
        &self,
        employee_id: &str,
        job_post_id: &str,
    ) -> IntegrationResult<Connection<IdRecord>> {
        self.call().await?;
        Ok(self.with(|s| {
            Connection::from_nodes(
                s.links
                    .iter()
                    .filter(|l| l.employee_id == employee_id && l.job_post_id == job_post_id)
                    .map(|l| IdRecord { id: l.id.clone() })
                    .collect(),
            )
        }))
    }

    async fn employee_job_posts_page(
        &self,
        filter: &EmployeeJobPostFilter,
        after: &str,
        first: u32,
    ) -> IntegrationResult<Connection<EmployeeJobPostNode>> {
        self.call().await?;
        Ok(self.with(|s| {
            s.page_filters.push(filter.clone());

            let rows: Vec<&EmployeeJobPostNode> = s
                .listing
                .iter()
                .filter(|row| match &filter.employee_id {
                    Some(Comparison::Eq(id)) => {
                        row.employee.as_ref().map(|e| e.id.as_str()) == Some(id.as_str())
                    }
                    _ => true,
                })
                .collect();

            let start = after.parse::<usize>().unwrap_or(0).min(rows.len());
            let end = (start + first as usize).min(rows.len());
            let mut page = Connection::from_nodes(rows[start..end].iter().map(|r| (*r).clone()).collect());
            page.total_count = rows.len() as u64;
            page.page_info = PageInfo {
                has_next_page: end < rows.len(),
                end_cursor: (!s.omit_end_cursor).then(|| end.to_string()),
                ..PageInfo::default()
            };
            page
        }))
    }

    async fn update_employee_job_post(
        &self,
        id: &str,
        update: &EmployeeJobPostUpdate,
    ) -> IntegrationResult<()> {
        self.mutate().await?;
        self.with(|s| {
            if let Some(link) = s.links.iter_mut().find(|l| l.id == id) {
                if let Some(active) = update.is_active {
                    link.is_active = active;
                }
                if let Some(archived) = update.is_archived {
                    link.is_archived = archived;
                }
                if let Some(applied) = update.is_applied {
                    link.is_applied = applied;
                }
            }
        });
        Ok(())
    }

    async fn create_employee_job_application(
        &self,
        input: &EmployeeJobApplicationInput,
    ) -> IntegrationResult<()> {
        self.mutate().await?;
        self.with(|s| s.applications.push(input.clone()));
        Ok(())
    }

    async fn delete_criteria(&self, employee_id: &str) -> IntegrationResult<u64> {
        self.mutate().await?;
        Ok(self.with(|s| {
            let before = s.criteria.len();
            s.criteria.retain(|(_, c)| {
                !(c.employee_id == employee_id && c.is_active && !c.is_archived)
            });
            (before - s.criteria.len()) as u64
        }))
    }

    async fn create_criteria(&self, criteria: &[CriterionInput]) -> IntegrationResult<Vec<IdRecord>> {
        self.mutate().await?;
        Ok(self.with(|s| {
            criteria
                .iter()
                .map(|c| {
                    let id = s.id("crit");
                    s.criteria.push((id.clone(), c.clone()));
                    IdRecord { id }
                })
                .collect()
        }))
    }

    async fn find_tenant_api_keys(&self, api_key: &str) -> IntegrationResult<Connection<IdRecord>> {
        self.call().await?;
        Ok(self.with(|s| {
            Connection::from_nodes(
                s.api_keys
                    .iter()
                    .filter(|(_, key, _)| key == api_key)
                    .map(|(id, _, _)| IdRecord { id: id.clone() })
                    .collect(),
            )
        }))
    }

    async fn update_tenant_api_key(
        &self,
        id: &str,
        update: &TenantApiKeyUpdate,
    ) -> IntegrationResult<TenantApiKeyRecord> {
        self.mutate().await?;
        self.with(|s| {
            if let Some(entry) = s.api_keys.iter_mut().find(|(key_id, _, _)| key_id == id) {
                entry.2 = update.clone();
            }
        });
        Ok(TenantApiKeyRecord {
            open_ai_secret_key: update.open_ai_secret_key.clone(),
            open_ai_organization_id: update.open_ai_organization_id.clone(),
        })
    }

    async fn rest_get(&self, path: &str, _params: &QueryParams) -> IntegrationResult<Value> {
        self.call().await?;
        self.with(|s| {
            s.rest_calls.push(RestCall {
                method: "GET",
                path: path.to_string(),
                body: None,
            })
        });
        Ok(json!({ "path": path }))
    }

    async fn rest_post(&self, path: &str, body: Option<&Value>) -> IntegrationResult<Value> {
        self.call().await?;
        self.with(|s| {
            s.rest_calls.push(RestCall {
                method: "POST",
                path: path.to_string(),
                body: body.cloned(),
            })
        });
        Ok(json!({ "path": path, "accepted": true }))
    }

    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> IntegrationResult<Vec<ImageAnalysisResult>> {
        self.call().await?;
        Ok(vec![ImageAnalysisResult {
            success: !bytes.is_empty(),
            data: ImageAnalysisData {
                mimetype: "application/octet-stream".into(),
                filename: filename.to_string(),
                ..ImageAnalysisData::default()
            },
        }])
    }
}
