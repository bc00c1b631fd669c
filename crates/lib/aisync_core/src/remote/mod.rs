// @awa-component: INT-RemoteClient
//
//! Remote service access.
//!
//! [`RemoteApi`] is the typed seam the sync engine and job matching are
//! written against: one method per remote operation. [`GraphQlApi`] is the
//! production implementation over [`RemoteClient`], bound to one request's
//! credentials.

pub mod client;
pub mod documents;
pub mod filter;
pub mod graphql;
pub mod headers;
pub mod query;

use async_trait::async_trait;
use serde_json::Value;

pub use client::RemoteClient;
pub use filter::{Comparison, EmployeeJobPostFilter};
pub use graphql::GraphQlApi;
pub use headers::{RequestCredentials, build_headers};
pub use query::QueryParams;

use crate::error::IntegrationResult;
use crate::models::remote::{
    Connection, CriterionInput, EmployeeInput, EmployeeJobApplicationInput, EmployeeJobPostNode,
    EmployeeJobPostUpdate, EmployeeRecord, IdRecord, ImageAnalysisResult, TenantApiKeyRecord,
    TenantApiKeyUpdate, TenantInput, TenantRecord, UserInput, UserRecord,
};

/// Page size of one cursor round trip against `employeeJobPosts`.
pub const REMOTE_PAGE_SIZE: u32 = 50;

/// Typed remote operations.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    // -- users --------------------------------------------------------------

    async fn find_users_by_external_id(
        &self,
        external_user_id: &str,
        external_tenant_id: &str,
    ) -> IntegrationResult<Connection<UserRecord>>;

    async fn find_users_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> IntegrationResult<Connection<UserRecord>>;

    async fn create_user(&self, input: &UserInput) -> IntegrationResult<UserRecord>;

    async fn update_user(&self, id: &str, input: &UserInput) -> IntegrationResult<()>;

    // -- employees ----------------------------------------------------------

    async fn find_employees_by_external_id(
        &self,
        external_employee_id: &str,
    ) -> IntegrationResult<Connection<EmployeeRecord>>;

    async fn find_employees_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> IntegrationResult<Connection<EmployeeRecord>>;

    async fn create_employee(&self, input: &EmployeeInput) -> IntegrationResult<EmployeeRecord>;

    async fn update_employee(&self, id: &str, input: &EmployeeInput) -> IntegrationResult<()>;

    /// `employees { totalCount }`; doubles as a connectivity probe.
    async fn count_employees(&self) -> IntegrationResult<u64>;

    // -- tenants ------------------------------------------------------------

    async fn find_tenants_by_external_id(
        &self,
        external_tenant_id: &str,
    ) -> IntegrationResult<Connection<TenantRecord>>;

    async fn find_tenants_by_name(&self, name: &str) -> IntegrationResult<Connection<TenantRecord>>;

    async fn create_tenant(&self, input: &TenantInput) -> IntegrationResult<TenantRecord>;

    async fn update_tenant(&self, id: &str, input: &TenantInput) -> IntegrationResult<()>;

    // -- job posts ----------------------------------------------------------

    async fn find_job_posts(
        &self,
        provider_code: &str,
        provider_job_id: &str,
    ) -> IntegrationResult<Connection<IdRecord>>;

    async fn find_employee_job_posts(
        &self,
        employee_id: &str,
        job_post_id: &str,
    ) -> IntegrationResult<Connection<IdRecord>>;

    /// One cursor round trip, sorted by `jobDateCreated` descending.
    async fn employee_job_posts_page(
        &self,
        filter: &EmployeeJobPostFilter,
        after: &str,
        first: u32,
    ) -> IntegrationResult<Connection<EmployeeJobPostNode>>;

    async fn update_employee_job_post(
        &self,
        id: &str,
        update: &EmployeeJobPostUpdate,
    ) -> IntegrationResult<()>;

    async fn create_employee_job_application(
        &self,
        input: &EmployeeJobApplicationInput,
    ) -> IntegrationResult<()>;

    // -- search criteria ----------------------------------------------------

    /// Delete all active, non-archived criteria of a remote employee.
    async fn delete_criteria(&self, employee_id: &str) -> IntegrationResult<u64>;

    async fn create_criteria(&self, criteria: &[CriterionInput]) -> IntegrationResult<Vec<IdRecord>>;

    // -- tenant api keys ----------------------------------------------------

    async fn find_tenant_api_keys(&self, api_key: &str) -> IntegrationResult<Connection<IdRecord>>;

    async fn update_tenant_api_key(
        &self,
        id: &str,
        update: &TenantApiKeyUpdate,
    ) -> IntegrationResult<TenantApiKeyRecord>;

    // -- REST ---------------------------------------------------------------

    async fn rest_get(&self, path: &str, params: &QueryParams) -> IntegrationResult<Value>;

    async fn rest_post(&self, path: &str, body: Option<&Value>) -> IntegrationResult<Value>;

    /// Multipart `image/process` upload.
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> IntegrationResult<Vec<ImageAnalysisResult>>;
}
