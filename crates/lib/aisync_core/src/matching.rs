// @awa-component: INT-JobMatching
//
//! Job matching: id-chain resolution, apply/hide/mark-applied mutations,
//! the paginated job listing and the REST application workflow.
//!
//! Every mutation that needs a remote id resolves the chain
//! employee → job post → employee-job-post link first. A missing link is an
//! expected outcome (the remote automation may not have ingested the job
//! yet) and ends in "redirect required" without any mutation.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{IntegrationError, IntegrationResult};
use crate::models::matching::{
    ApplyInput, ApplyResult, EmployeeJobPost, EmployeeStatusInput, JobPostFilters,
    JobPostListQuery, Pagination, TenantApiKeyInput, UpdateAppliedResult, VisibilityInput,
};
use crate::models::remote::{
    EmployeeInput, EmployeeJobApplicationInput, EmployeeJobPostUpdate, ImageAnalysisResult,
    TenantApiKeyRecord, TenantApiKeyUpdate,
};
use crate::remote::filter::JobPostFieldFilter;
use crate::remote::{Comparison, EmployeeJobPostFilter, QueryParams, REMOTE_PAGE_SIZE, RemoteApi};
use crate::sync::{EntitySyncEngine, SyncLocks};

pub const APPLICATION_PROCESS_PATH: &str = "employee/job/application/process";
pub const APPLICATION_PRE_PROCESS_PATH: &str = "employee/job/application/pre-process";

/// The step at which an id chain stopped resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStep {
    Employee,
    JobPost,
    Association,
}

/// Remote ids needed to mutate an employee's job-post link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChain {
    pub employee_id: String,
    pub job_post_id: String,
    pub employee_job_post_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedChain),
    Unresolved(ResolutionStep),
}

/// Largest `limit` a listing request may ask for.
pub const MAX_LISTING_LIMIT: u32 = 200;

/// Largest `page * limit` window; bounds the records buffered per request.
pub const MAX_LISTING_WINDOW: u64 = 10_000;

/// Number of cursor round trips needed to cover `page * limit` records.
pub fn trips_needed(page: u32, limit: u32, page_size: u32) -> u32 {
    let wanted = u64::from(page) * u64::from(limit);
    let trips = wanted.div_ceil(u64::from(page_size.max(1))).max(1);
    u32::try_from(trips).unwrap_or(u32::MAX)
}

/// Records `(page-1)*limit .. page*limit` of `items`, order preserved.
pub fn page_slice<T>(mut items: Vec<T>, page: u32, limit: u32) -> Vec<T> {
    let start = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
    if start >= items.len() {
        return Vec::new();
    }
    let end = start.saturating_add(limit as usize).min(items.len());
    items.truncate(end);
    items.split_off(start)
}

fn path_id<'v>(id: &'v str, what: &str) -> IntegrationResult<&'v str> {
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(IntegrationError::Validation(format!("invalid {what}")));
    }
    Ok(id)
}

pub struct JobMatchingService<'a> {
    remote: &'a dyn RemoteApi,
    engine: EntitySyncEngine<'a>,
}

impl<'a> JobMatchingService<'a> {
    pub fn new(remote: &'a dyn RemoteApi, locks: &'a SyncLocks) -> Self {
        Self {
            remote,
            engine: EntitySyncEngine::new(remote, locks),
        }
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    pub async fn resolve_employee(&self, external_employee_id: &str) -> IntegrationResult<Option<String>> {
        self.engine.find_employee_id(external_employee_id).await
    }

    pub async fn resolve_job_post(
        &self,
        provider_code: &str,
        provider_job_id: &str,
    ) -> IntegrationResult<Option<String>> {
        if provider_code.is_empty() || provider_job_id.is_empty() {
            return Ok(None);
        }
        Ok(self
            .remote
            .find_job_posts(provider_code, provider_job_id)
            .await?
            .into_first()
            .map(|r| r.id))
    }

    pub async fn resolve_association(
        &self,
        employee_remote_id: &str,
        job_post_remote_id: &str,
    ) -> IntegrationResult<Option<String>> {
        Ok(self
            .remote
            .find_employee_job_posts(employee_remote_id, job_post_remote_id)
            .await?
            .into_first()
            .map(|r| r.id))
    }

    /// Resolve employee, then job post, then their link. Stops at the first miss.
    pub async fn resolve_chain(
        &self,
        external_employee_id: &str,
        provider_code: &str,
        provider_job_id: &str,
    ) -> IntegrationResult<Resolution> {
        let Some(employee_id) = self.resolve_employee(external_employee_id).await? else {
            return Ok(Resolution::Unresolved(ResolutionStep::Employee));
        };
        let Some(job_post_id) = self.resolve_job_post(provider_code, provider_job_id).await? else {
            return Ok(Resolution::Unresolved(ResolutionStep::JobPost));
        };
        let Some(employee_job_post_id) = self.resolve_association(&employee_id, &job_post_id).await? else {
            return Ok(Resolution::Unresolved(ResolutionStep::Association));
        };
        Ok(Resolution::Resolved(ResolvedChain {
            employee_id,
            job_post_id,
            employee_job_post_id,
        }))
    }

    async fn resolve_for(&self, operation: &str, input: &ApplyInput) -> IntegrationResult<Option<ResolvedChain>> {
        match self
            .resolve_chain(&input.employee_id, &input.provider_code, &input.provider_job_id)
            .await?
        {
            Resolution::Resolved(chain) => Ok(Some(chain)),
            Resolution::Unresolved(step) => {
                info!(
                    operation,
                    employee_id = %input.employee_id,
                    provider_code = %input.provider_code,
                    provider_job_id = %input.provider_job_id,
                    unresolved = ?step,
                    "redirect required"
                );
                Ok(None)
            }
        }
    }

    fn application(chain: &ResolvedChain, input: &ApplyInput) -> EmployeeJobApplicationInput {
        EmployeeJobApplicationInput {
            employee_id: chain.employee_id.clone(),
            job_post_id: chain.job_post_id.clone(),
            employee_job_post_id: chain.employee_job_post_id.clone(),
            provider_code: input.provider_code.clone(),
            provider_job_id: Some(input.provider_job_id.clone()),
            proposal: input.proposal.clone(),
            rate: input.rate,
            attachments: input.attachments.clone(),
            applied_date: Utc::now(),
            is_active: true,
            is_archived: false,
            job_type: input.job_type.clone(),
            job_status: input.job_status.clone(),
            terms: input.terms.clone(),
            qa: input.qa.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Apply through the remote automation.
    pub async fn apply(&self, input: &ApplyInput) -> IntegrationResult<ApplyResult> {
        let Some(chain) = self.resolve_for("apply", input).await? else {
            return Ok(ApplyResult::redirect());
        };

        let body = serde_json::to_value(Self::application(&chain, input))
            .map_err(|e| IntegrationError::Validation(format!("unserializable application: {e}")))?;
        let response = self
            .remote
            .rest_post(APPLICATION_PROCESS_PATH, Some(&body))
            .await?;

        info!(
            operation = "apply",
            employee_job_post_id = %chain.employee_job_post_id,
            "application submitted"
        );
        Ok(ApplyResult {
            is_redirect_required: false,
            application: Some(response),
        })
    }

    /// Hide or show one job post for one employee.
    ///
    /// Returns `false` without mutating when any id is missing or unresolved.
    pub async fn update_visibility(&self, input: &VisibilityInput) -> IntegrationResult<bool> {
        let (Some(employee_id), Some(provider_code), Some(provider_job_id)) = (
            input.employee_id.as_deref().filter(|v| !v.is_empty()),
            input.provider_code.as_deref().filter(|v| !v.is_empty()),
            input.provider_job_id.as_deref().filter(|v| !v.is_empty()),
        ) else {
            debug!(operation = "update_visibility", "bulk visibility is not supported");
            return Ok(false);
        };

        let Resolution::Resolved(chain) = self
            .resolve_chain(employee_id, provider_code, provider_job_id)
            .await?
        else {
            return Ok(false);
        };

        self.remote
            .update_employee_job_post(
                &chain.employee_job_post_id,
                &EmployeeJobPostUpdate {
                    employee_id: chain.employee_id.clone(),
                    job_post_id: chain.job_post_id.clone(),
                    is_active: Some(!input.hide),
                    is_archived: Some(input.hide),
                    ..EmployeeJobPostUpdate::default()
                },
            )
            .await?;

        info!(
            operation = "update_visibility",
            employee_job_post_id = %chain.employee_job_post_id,
            hide = input.hide,
            "visibility updated"
        );
        Ok(true)
    }

    /// Record an application and mark the link applied.
    pub async fn update_applied(&self, input: &ApplyInput) -> IntegrationResult<UpdateAppliedResult> {
        let Some(chain) = self.resolve_for("update_applied", input).await? else {
            return Ok(UpdateAppliedResult {
                is_redirect_required: true,
            });
        };

        let application = Self::application(&chain, input);
        let applied_date = application.applied_date;
        self.remote
            .create_employee_job_application(&application)
            .await?;
        self.remote
            .update_employee_job_post(
                &chain.employee_job_post_id,
                &EmployeeJobPostUpdate {
                    employee_id: chain.employee_id.clone(),
                    job_post_id: chain.job_post_id.clone(),
                    is_applied: Some(true),
                    applied_date: Some(applied_date),
                    ..EmployeeJobPostUpdate::default()
                },
            )
            .await?;

        info!(
            operation = "update_applied",
            employee_job_post_id = %chain.employee_job_post_id,
            "marked applied"
        );
        Ok(UpdateAppliedResult {
            is_redirect_required: false,
        })
    }

    /// Turn job search on or off for an employee.
    pub async fn update_employee_status(&self, input: &EmployeeStatusInput) -> IntegrationResult<bool> {
        let Some(remote_id) = self.resolve_employee(&input.employee_id).await? else {
            info!(
                operation = "update_employee_status",
                employee_id = %input.employee_id,
                "employee not synced"
            );
            return Ok(false);
        };

        self.remote
            .update_employee(
                &remote_id,
                &EmployeeInput {
                    external_employee_id: Some(input.employee_id.clone()),
                    external_tenant_id: Some(input.tenant_id.clone()),
                    external_org_id: Some(input.organization_id.clone()),
                    is_active: Some(input.is_job_search_active),
                    is_archived: Some(!input.is_job_search_active),
                    ..EmployeeInput::default()
                },
            )
            .await?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    async fn listing_filter(&self, filters: &JobPostFilters) -> IntegrationResult<Option<EmployeeJobPostFilter>> {
        let non_empty = |v: &Vec<String>| (!v.is_empty()).then(|| Comparison::In(v.clone()));

        let mut filter = EmployeeJobPostFilter {
            is_active: Some(Comparison::Is(Some(true))),
            is_archived: Some(Comparison::Is(Some(false))),
            is_applied: filters.is_applied.map(|v| Comparison::Is(Some(v))),
            job_date_created: filters.job_date_created.clone().map(Comparison::Raw),
            job_post: filters
                .title
                .as_deref()
                .filter(|t| !t.is_empty())
                .map(|t| JobPostFieldFilter {
                    title: Some(Comparison::contains_ignore_case(t)),
                }),
            job_type: non_empty(&filters.job_type),
            job_status: non_empty(&filters.job_status),
            provider_code: non_empty(&filters.job_source),
            tenant_id: Some(Comparison::is_null()),
            employee_id: None,
        };

        if let Some(tenant) = filters.tenant_id.as_deref().filter(|t| !t.is_empty()) {
            match self.engine.find_tenant_id(tenant).await? {
                Some(remote_tenant) => filter.tenant_id = Some(Comparison::eq(remote_tenant)),
                None => debug!(tenant_id = %tenant, "tenant not synced, listing global posts"),
            }
        }

        if let Some(employee) = filters.employee_ids.first().filter(|e| !e.is_empty()) {
            match self.resolve_employee(employee).await? {
                Some(remote_employee) => filter.employee_id = Some(Comparison::eq(remote_employee)),
                None => return Ok(None),
            }
        }

        Ok(Some(filter))
    }

    /// Offset pagination over the remote cursor listing.
    pub async fn list_employee_job_posts(
        &self,
        query: &JobPostListQuery,
    ) -> IntegrationResult<Pagination<EmployeeJobPost>> {
        if query.page == 0 || query.limit == 0 {
            return Err(IntegrationError::Validation(
                "page and limit must be at least 1".to_string(),
            ));
        }
        if query.limit > MAX_LISTING_LIMIT {
            return Err(IntegrationError::Validation(format!(
                "limit must be at most {MAX_LISTING_LIMIT}"
            )));
        }
        if u64::from(query.page) * u64::from(query.limit) > MAX_LISTING_WINDOW {
            return Err(IntegrationError::Validation(format!(
                "page * limit must be at most {MAX_LISTING_WINDOW}"
            )));
        }

        let filters = query.filters.clone().unwrap_or_default();
        let Some(filter) = self.listing_filter(&filters).await? else {
            info!(operation = "list_employee_job_posts", "employee filter did not resolve");
            return Ok(Pagination::empty());
        };

        let trips = trips_needed(query.page, query.limit, REMOTE_PAGE_SIZE);
        debug!(trips, page = query.page, limit = query.limit, "listing round trips");

        let mut records = Vec::new();
        let mut after = String::new();
        let mut total = 0;
        let mut trip = 0;

        loop {
            let page = self
                .remote
                .employee_job_posts_page(&filter, &after, REMOTE_PAGE_SIZE)
                .await?;
            trip += 1;
            total = page.total_count;
            let has_next = page.page_info.has_next_page;
            let end_cursor = page.page_info.end_cursor.clone().filter(|c| !c.is_empty());
            records.extend(page.into_nodes().into_iter().map(EmployeeJobPost::from));

            if !has_next || trip >= trips {
                break;
            }
            // An empty cursor would restart the listing and duplicate rows.
            let Some(cursor) = end_cursor else {
                return Err(IntegrationError::decode(
                    "employeeJobPosts",
                    "hasNextPage without endCursor",
                ));
            };
            after = cursor;
        }

        info!(
            operation = "list_employee_job_posts",
            total,
            fetched = records.len(),
            trips = trip,
            "listing fetched"
        );
        Ok(Pagination {
            items: page_slice(records, query.page, query.limit),
            total,
        })
    }

    // -----------------------------------------------------------------------
    // REST application workflow
    // -----------------------------------------------------------------------

    /// Create a pre-processed application for a synced employee.
    ///
    /// `None` when the employee is not known remotely.
    pub async fn pre_process(&self, input: &ApplyInput) -> IntegrationResult<Option<Value>> {
        let Some(remote_id) = self.resolve_employee(&input.employee_id).await? else {
            return Ok(None);
        };
        let mut payload = input.clone();
        payload.employee_id = remote_id;
        let body = serde_json::to_value(&payload)
            .map_err(|e| IntegrationError::Validation(format!("unserializable application: {e}")))?;

        Ok(Some(
            self.remote
                .rest_post(APPLICATION_PRE_PROCESS_PATH, Some(&body))
                .await?,
        ))
    }

    pub async fn generate_proposal(&self, application_id: &str) -> IntegrationResult<Value> {
        let id = path_id(application_id, "application id")?;
        self.remote
            .rest_post(&format!("employee/job/application/generate-proposal/{id}"), None)
            .await
    }

    pub async fn get_application(&self, application_id: &str) -> IntegrationResult<Value> {
        let id = path_id(application_id, "application id")?;
        self.remote
            .rest_get(&format!("employee/job/application/{id}"), &QueryParams::new())
            .await
    }

    pub async fn analyze_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> IntegrationResult<Vec<ImageAnalysisResult>> {
        if bytes.is_empty() {
            return Err(IntegrationError::Validation("image is empty".to_string()));
        }
        self.remote.upload_image(bytes, filename).await
    }

    /// Store new OpenAI credentials on the remote tenant API key.
    ///
    /// `None` when no remote key matches.
    pub async fn update_tenant_api_key(
        &self,
        input: &TenantApiKeyInput,
    ) -> IntegrationResult<Option<TenantApiKeyRecord>> {
        if input.api_key.is_empty() {
            return Err(IntegrationError::Validation("apiKey is required".to_string()));
        }
        let Some(key) = self
            .remote
            .find_tenant_api_keys(&input.api_key)
            .await?
            .into_first()
        else {
            return Ok(None);
        };

        let record = self
            .remote
            .update_tenant_api_key(
                &key.id,
                &TenantApiKeyUpdate {
                    open_ai_secret_key: input.open_ai_secret_key.clone(),
                    open_ai_organization_id: input.open_ai_organization_id.clone(),
                },
            )
            .await?;
        Ok(Some(record))
    }
}
