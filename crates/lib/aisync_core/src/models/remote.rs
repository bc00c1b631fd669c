// @awa-component: INT-RemoteSchema
//
//! Remote record shapes.
//!
//! Inputs serialize in camelCase and omit absent fields, so an update only
//! touches the fields it carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

/// Cursor position reported by a paginated query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// A GraphQL connection (`edges { node }`, `pageInfo`, `totalCount`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub total_count: u64,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
            total_count: 0,
        }
    }
}

impl<T> Connection<T> {
    pub fn from_nodes(nodes: Vec<T>) -> Self {
        let total_count = nodes.len() as u64;
        Self {
            edges: nodes.into_iter().map(|node| Edge { node }).collect(),
            page_info: PageInfo::default(),
            total_count,
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.edges.first().map(|e| &e.node)
    }

    pub fn into_first(self) -> Option<T> {
        self.edges.into_iter().next().map(|e| e.node)
    }

    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Any record where only the remote id matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdRecord {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub external_tenant_id: Option<String>,
    pub external_user_id: Option<String>,
    pub is_active: Option<bool>,
    pub is_archived: Option<bool>,
}

/// Create/update payload for a remote user. Password hashes are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: String,
    pub external_employee_id: Option<String>,
    pub external_tenant_id: Option<String>,
    pub external_org_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_id: Option<String>,
    pub is_active: Option<bool>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upwork_organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upwork_organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upwork_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_in_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Tenants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRecord {
    pub id: String,
    pub name: Option<String>,
    pub external_tenant_id: Option<String>,
    pub is_active: Option<bool>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

// ---------------------------------------------------------------------------
// Job posts and employee ↔ job-post links
// ---------------------------------------------------------------------------

/// A remote job post as returned inside listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPost {
    pub id: Option<String>,
    pub provider_code: Option<String>,
    pub provider_job_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub job_date_created: Option<DateTime<Utc>>,
    pub job_status: Option<String>,
    pub job_type: Option<String>,
    pub url: Option<String>,
    pub budget: Option<String>,
    pub duration: Option<String>,
    pub workload: Option<String>,
    pub skills: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub country: Option<String>,
    pub client_feedback: Option<String>,
    pub client_reviews_count: Option<f64>,
    pub client_jobs_posted: Option<f64>,
    pub client_past_hires: Option<f64>,
    pub client_payment_verification_status: Option<bool>,
    pub search_category: Option<String>,
    pub search_occupation: Option<String>,
    pub search_keyword: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRef {
    pub id: String,
    pub external_employee_id: Option<String>,
}

/// One node of the `employeeJobPosts` listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeJobPostNode {
    pub id: String,
    pub is_applied: Option<bool>,
    pub applied_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_archived: bool,
    pub employee: Option<EmployeeRef>,
    pub provider_code: Option<String>,
    pub provider_job_id: Option<String>,
    pub job_date_created: Option<DateTime<Utc>>,
    pub job_status: Option<String>,
    pub job_type: Option<String>,
    pub job_post: Option<JobPost>,
}

/// Partial update of an employee ↔ job-post link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeJobPostUpdate {
    pub employee_id: String,
    pub job_post_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_applied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<DateTime<Utc>>,
}

/// Payload of `createOneEmployeeJobApplication` and of the REST apply call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeJobApplicationInput {
    pub employee_id: String,
    pub job_post_id: String,
    pub employee_job_post_id: String,
    pub provider_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<String>,
    pub applied_date: DateTime<Utc>,
    pub is_active: bool,
    pub is_archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qa: Option<String>,
}

// ---------------------------------------------------------------------------
// Search criteria
// ---------------------------------------------------------------------------

/// One remote job-search criterion row to create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionInput {
    pub employee_id: String,
    pub is_active: bool,
    pub is_archived: bool,
    pub job_type: String,
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Tenant API keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantApiKeyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_ai_secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_ai_organization_id: Option<String>,
}

/// Fields echoed back by `updateOneTenantApiKey`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantApiKeyRecord {
    pub open_ai_secret_key: Option<String>,
    pub open_ai_organization_id: Option<String>,
}

impl std::fmt::Debug for TenantApiKeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantApiKeyRecord")
            .field("open_ai_secret_key", &self.open_ai_secret_key.as_ref().map(|_| "***"))
            .field("open_ai_organization_id", &self.open_ai_organization_id)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Image analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnalysisEntry {
    pub work: bool,
    pub description: String,
    #[serde(default)]
    pub apps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnalysisData {
    pub mimetype: String,
    pub filename: String,
    #[serde(default)]
    pub analysis: Vec<ImageAnalysisEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One `image/process` result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnalysisResult {
    pub success: bool,
    pub data: ImageAnalysisData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inputs_omit_absent_fields() {
        let input = EmployeeInput {
            external_employee_id: Some("e1".into()),
            is_active: Some(false),
            ..EmployeeInput::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({ "externalEmployeeId": "e1", "isActive": false })
        );
    }

    #[test]
    fn connection_decodes_without_optional_parts() {
        let conn: Connection<IdRecord> =
            serde_json::from_value(json!({ "edges": [{ "node": { "id": "r1" } }] })).unwrap();
        assert_eq!(conn.first().map(|r| r.id.as_str()), Some("r1"));
        assert_eq!(conn.total_count, 0);
        assert!(!conn.page_info.has_next_page);
    }

    #[test]
    fn image_analysis_result_decodes() {
        let parsed: Vec<ImageAnalysisResult> = serde_json::from_value(json!([{
            "success": true,
            "data": {
                "mimetype": "image/png",
                "filename": "shot.png",
                "analysis": [{ "work": true, "description": "editor", "apps": ["vscode"] }]
            }
        }]))
        .unwrap();
        assert_eq!(parsed[0].data.analysis[0].apps, vec!["vscode".to_string()]);
        assert!(parsed[0].data.message.is_none());
    }

    #[test]
    fn tenant_api_key_debug_hides_secret() {
        let rec = TenantApiKeyRecord {
            open_ai_secret_key: Some("sk-live".into()),
            open_ai_organization_id: Some("org".into()),
        };
        assert!(!format!("{rec:?}").contains("sk-live"));
    }
}
