//! [`RemoteApi`] over GraphQL and REST.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::{Value, json};

use super::documents as doc;
use super::filter::{EmployeeJobPostFilter, SortDirection, SortField};
use super::{QueryParams, RemoteApi, RemoteClient, RequestCredentials};
use crate::credentials::CredentialSet;
use crate::error::{IntegrationError, IntegrationResult};
use crate::models::remote::{
    Connection, CriterionInput, EmployeeInput, EmployeeJobApplicationInput, EmployeeJobPostNode,
    EmployeeJobPostUpdate, EmployeeRecord, IdRecord, ImageAnalysisResult, TenantApiKeyRecord,
    TenantApiKeyUpdate, TenantInput, TenantRecord, UserInput, UserRecord,
};

pub const IMAGE_PROCESS_PATH: &str = "image/process";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletedCount {
    #[serde(default)]
    deleted_count: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TotalCount {
    #[serde(default)]
    total_count: u64,
}

/// Remote access bound to one credential context.
#[derive(Debug, Clone)]
pub struct GraphQlApi {
    client: Arc<RemoteClient>,
    credentials: RequestCredentials,
}

impl GraphQlApi {
    pub fn new(client: Arc<RemoteClient>, effective: CredentialSet) -> Self {
        Self {
            client,
            credentials: RequestCredentials::new(effective),
        }
    }

    /// Apply a per-call override on top of the effective credentials.
    pub fn with_explicit(mut self, explicit: CredentialSet) -> Self {
        self.credentials = self.credentials.with_explicit(explicit);
        self
    }

    async fn run<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        document: &str,
        variables: Value,
        field: &str,
    ) -> IntegrationResult<T> {
        self.client
            .graphql(&self.credentials, operation, document, variables, field)
            .await
    }

    /// Mutations whose echo is not needed. A `null` payload is accepted.
    async fn run_discard(
        &self,
        operation: &str,
        document: &str,
        variables: Value,
    ) -> IntegrationResult<()> {
        let _: Value = self.run(operation, document, variables, operation).await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteApi for GraphQlApi {
    async fn find_users_by_external_id(
        &self,
        external_user_id: &str,
        external_tenant_id: &str,
    ) -> IntegrationResult<Connection<UserRecord>> {
        self.run(
            "usersByExternalId",
            doc::USERS_BY_EXTERNAL_ID,
            json!({
                "externalUserIdFilter": external_user_id,
                "externalTenantIdFilter": external_tenant_id,
            }),
            "users",
        )
        .await
    }

    async fn find_users_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> IntegrationResult<Connection<UserRecord>> {
        self.run(
            "usersByName",
            doc::USERS_BY_NAME,
            json!({ "firstNameFilter": first_name, "lastNameFilter": last_name }),
            "users",
        )
        .await
    }

    async fn create_user(&self, input: &UserInput) -> IntegrationResult<UserRecord> {
        self.run(
            "createOneUser",
            doc::CREATE_USER,
            json!({ "input": { "user": input } }),
            "createOneUser",
        )
        .await
    }

    async fn update_user(&self, id: &str, input: &UserInput) -> IntegrationResult<()> {
        self.run_discard(
            "updateOneUser",
            doc::UPDATE_USER,
            json!({ "input": { "id": id, "update": input } }),
        )
        .await
    }

    async fn find_employees_by_external_id(
        &self,
        external_employee_id: &str,
    ) -> IntegrationResult<Connection<EmployeeRecord>> {
        self.run(
            "employeeByExternalEmployeeId",
            doc::EMPLOYEES_BY_EXTERNAL_ID,
            json!({ "externalEmployeeIdFilter": external_employee_id }),
            "employees",
        )
        .await
    }

    async fn find_employees_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> IntegrationResult<Connection<EmployeeRecord>> {
        self.run(
            "employeeByName",
            doc::EMPLOYEES_BY_NAME,
            json!({ "firstNameFilter": first_name, "lastNameFilter": last_name }),
            "employees",
        )
        .await
    }

    async fn create_employee(&self, input: &EmployeeInput) -> IntegrationResult<EmployeeRecord> {
        self.run(
            "createOneEmployee",
            doc::CREATE_EMPLOYEE,
            json!({ "input": { "employee": input } }),
            "createOneEmployee",
        )
        .await
    }

    async fn update_employee(&self, id: &str, input: &EmployeeInput) -> IntegrationResult<()> {
        self.run_discard(
            "updateOneEmployee",
            doc::UPDATE_EMPLOYEE,
            json!({ "input": { "id": id, "update": input } }),
        )
        .await
    }

    async fn count_employees(&self) -> IntegrationResult<u64> {
        let count: TotalCount = self
            .run("countEmployees", doc::COUNT_EMPLOYEES, json!({}), "employees")
            .await?;
        Ok(count.total_count)
    }

    async fn find_tenants_by_external_id(
        &self,
        external_tenant_id: &str,
    ) -> IntegrationResult<Connection<TenantRecord>> {
        self.run(
            "tenantByExternalTenantId",
            doc::TENANTS_BY_EXTERNAL_ID,
            json!({ "externalTenantIdFilter": external_tenant_id }),
            "tenants",
        )
        .await
    }

    async fn find_tenants_by_name(&self, name: &str) -> IntegrationResult<Connection<TenantRecord>> {
        self.run(
            "tenantByName",
            doc::TENANTS_BY_NAME,
            json!({ "nameFilter": name }),
            "tenants",
        )
        .await
    }

    async fn create_tenant(&self, input: &TenantInput) -> IntegrationResult<TenantRecord> {
        self.run(
            "createOneTenant",
            doc::CREATE_TENANT,
            json!({ "input": { "tenant": input } }),
            "createOneTenant",
        )
        .await
    }

    async fn update_tenant(&self, id: &str, input: &TenantInput) -> IntegrationResult<()> {
        self.run_discard(
            "updateOneTenant",
            doc::UPDATE_TENANT,
            json!({ "input": { "id": id, "update": input } }),
        )
        .await
    }

    async fn find_job_posts(
        &self,
        provider_code: &str,
        provider_job_id: &str,
    ) -> IntegrationResult<Connection<IdRecord>> {
        self.run(
            "jobPosts",
            doc::JOB_POSTS_BY_PROVIDER,
            json!({
                "providerCodeFilter": provider_code,
                "providerJobIdFilter": provider_job_id,
            }),
            "jobPosts",
        )
        .await
    }

    async fn find_employee_job_posts(
        &self,
        employee_id: &str,
        job_post_id: &str,
    ) -> IntegrationResult<Connection<IdRecord>> {
        self.run(
            "employeeJobPostsByEmployeeIdJobPostId",
            doc::EMPLOYEE_JOB_POSTS_BY_IDS,
            json!({ "employeeIdFilter": employee_id, "jobPostIdFilter": job_post_id }),
            "employeeJobPosts",
        )
        .await
    }

    async fn employee_job_posts_page(
        &self,
        filter: &EmployeeJobPostFilter,
        after: &str,
        first: u32,
    ) -> IntegrationResult<Connection<EmployeeJobPostNode>> {
        let sorting = [SortField {
            field: "jobDateCreated",
            direction: SortDirection::Desc,
        }];
        self.run(
            "employeeJobPosts",
            doc::EMPLOYEE_JOB_POSTS_PAGE,
            json!({
                "after": after,
                "first": first,
                "filter": filter,
                "sorting": sorting,
            }),
            "employeeJobPosts",
        )
        .await
    }

    async fn update_employee_job_post(
        &self,
        id: &str,
        update: &EmployeeJobPostUpdate,
    ) -> IntegrationResult<()> {
        self.run_discard(
            "updateOneEmployeeJobPost",
            doc::UPDATE_EMPLOYEE_JOB_POST,
            json!({ "input": { "id": id, "update": update } }),
        )
        .await
    }

    async fn create_employee_job_application(
        &self,
        input: &EmployeeJobApplicationInput,
    ) -> IntegrationResult<()> {
        self.run_discard(
            "createOneEmployeeJobApplication",
            doc::CREATE_EMPLOYEE_JOB_APPLICATION,
            json!({ "input": { "employeeJobApplication": input } }),
        )
        .await
    }

    async fn delete_criteria(&self, employee_id: &str) -> IntegrationResult<u64> {
        let deleted: DeletedCount = self
            .run(
                "deleteManyUpworkJobsSearchCriteria",
                doc::DELETE_CRITERIA,
                json!({
                    "input": {
                        "filter": {
                            "isActive": { "is": true },
                            "isArchived": { "is": false },
                            "employeeId": { "eq": employee_id },
                        }
                    }
                }),
                "deleteManyUpworkJobsSearchCriteria",
            )
            .await?;
        Ok(deleted.deleted_count)
    }

    async fn create_criteria(&self, criteria: &[CriterionInput]) -> IntegrationResult<Vec<IdRecord>> {
        self.run(
            "createManyUpworkJobsSearchCriteria",
            doc::CREATE_CRITERIA,
            json!({ "input": { "upworkJobsSearchCriteria": criteria } }),
            "createManyUpworkJobsSearchCriteria",
        )
        .await
    }

    async fn find_tenant_api_keys(&self, api_key: &str) -> IntegrationResult<Connection<IdRecord>> {
        self.run(
            "tenantApiKeysByKey",
            doc::TENANT_API_KEYS_BY_KEY,
            json!({ "externalApiKeyFilter": api_key }),
            "tenantApiKeys",
        )
        .await
    }

    async fn update_tenant_api_key(
        &self,
        id: &str,
        update: &TenantApiKeyUpdate,
    ) -> IntegrationResult<TenantApiKeyRecord> {
        self.run(
            "updateOneTenantApiKey",
            doc::UPDATE_TENANT_API_KEY,
            json!({ "input": { "id": id, "update": update } }),
            "updateOneTenantApiKey",
        )
        .await
    }

    async fn rest_get(&self, path: &str, params: &QueryParams) -> IntegrationResult<Value> {
        self.client.get_json(&self.credentials, path, params).await
    }

    async fn rest_post(&self, path: &str, body: Option<&Value>) -> IntegrationResult<Value> {
        self.client.post_json(&self.credentials, path, body).await
    }

    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> IntegrationResult<Vec<ImageAnalysisResult>> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| IntegrationError::Validation(format!("invalid upload part: {e}")))?;
        let form = Form::new().part("files", part);

        self.client
            .post_multipart(&self.credentials, IMAGE_PROCESS_PATH, form)
            .await
    }
}
