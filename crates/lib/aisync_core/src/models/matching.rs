//! Job-matching inputs, results and listing shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::remote::{EmployeeJobPostNode, JobPost};

/// An application to a job, addressed by local employee id and provider ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyInput {
    pub employee_id: String,
    pub provider_code: String,
    pub provider_job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Comma separated file names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qa: Option<String>,
}

/// Outcome of `apply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResult {
    /// `true` when the application has to be completed manually.
    pub is_redirect_required: bool,
    /// What the automation endpoint returned, when it was called.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<serde_json::Value>,
}

impl ApplyResult {
    pub fn redirect() -> Self {
        Self {
            is_redirect_required: true,
            application: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppliedResult {
    pub is_redirect_required: bool,
}

/// Hide or show a job post for an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityInput {
    pub hide: bool,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub provider_code: Option<String>,
    #[serde(default)]
    pub provider_job_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStatusInput {
    pub employee_id: String,
    pub tenant_id: String,
    pub organization_id: String,
    pub is_job_search_active: bool,
}

/// Listing filters. List filters are sent as `in` comparisons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostFilters {
    /// Only the first id is used.
    #[serde(default)]
    pub employee_ids: Vec<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub is_applied: Option<bool>,
    /// Passed through verbatim as a date comparison.
    #[serde(default)]
    pub job_date_created: Option<serde_json::Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub job_type: Vec<String>,
    #[serde(default)]
    pub job_status: Vec<String>,
    /// Provider codes.
    #[serde(default)]
    pub job_source: Vec<String>,
}

/// Offset pagination request over the remote cursor listing. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub filters: Option<JobPostFilters>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl Default for JobPostListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            filters: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Pagination<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// A job post matched to an employee, keyed by the local employee id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeJobPost {
    /// Remote link id.
    pub id: String,
    /// Local employee id.
    pub employee_id: Option<String>,
    pub job_post_id: Option<String>,
    pub job_post: Option<JobPost>,
    pub job_date_created: Option<DateTime<Utc>>,
    pub provider_code: Option<String>,
    pub provider_job_id: Option<String>,
    pub job_status: Option<String>,
    pub job_type: Option<String>,
    pub is_applied: Option<bool>,
    pub applied_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub is_archived: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<EmployeeJobPostNode> for EmployeeJobPost {
    fn from(node: EmployeeJobPostNode) -> Self {
        Self {
            id: node.id,
            employee_id: node.employee.and_then(|e| e.external_employee_id),
            job_post_id: node.job_post.as_ref().and_then(|p| p.id.clone()),
            job_post: node.job_post,
            job_date_created: node.job_date_created,
            provider_code: node.provider_code,
            provider_job_id: node.provider_job_id,
            job_status: node.job_status,
            job_type: node.job_type,
            is_applied: node.is_applied,
            applied_date: node.applied_date,
            is_active: node.is_active,
            is_archived: node.is_archived,
            created_at: node.created_at,
            updated_at: node.updated_at,
        }
    }
}

/// New OpenAI credentials for the remote tenant API key matching `api_key`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantApiKeyInput {
    pub api_key: String,
    #[serde(default)]
    pub open_ai_secret_key: Option<String>,
    #[serde(default)]
    pub open_ai_organization_id: Option<String>,
}

impl std::fmt::Debug for TenantApiKeyInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantApiKeyInput")
            .field("api_key", &"***")
            .field("open_ai_secret_key", &self.open_ai_secret_key.as_ref().map(|_| "***"))
            .field("open_ai_organization_id", &self.open_ai_organization_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::remote::EmployeeRef;
    use serde_json::json;

    #[test]
    fn list_query_defaults() {
        let query: JobPostListQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert!(query.filters.is_none());
    }

    #[test]
    fn listing_item_uses_local_employee_id() {
        let node = EmployeeJobPostNode {
            id: "link-1".into(),
            employee: Some(EmployeeRef {
                id: "remote-emp".into(),
                external_employee_id: Some("local-emp".into()),
            }),
            job_post: Some(JobPost {
                id: Some("jp-1".into()),
                ..JobPost::default()
            }),
            ..EmployeeJobPostNode::default()
        };
        let item = EmployeeJobPost::from(node);
        assert_eq!(item.employee_id.as_deref(), Some("local-emp"));
        assert_eq!(item.job_post_id.as_deref(), Some("jp-1"));
    }

    #[test]
    fn redirect_result_serializes_flag_only() {
        assert_eq!(
            serde_json::to_value(ApplyResult::redirect()).unwrap(),
            json!({ "isRedirectRequired": true })
        );
    }
}
