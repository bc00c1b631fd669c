//! GraphQL documents sent to the remote service.
//!
//! Each constant pairs with the operation name passed as `operationName`.

pub const USERS_BY_EXTERNAL_ID: &str = r#"
query usersByExternalId($externalUserIdFilter: String!, $externalTenantIdFilter: String!) {
  users(filter: {
    externalUserId: { eq: $externalUserIdFilter }
    externalTenantId: { eq: $externalTenantIdFilter }
  }) {
    edges { node { id email username firstName lastName externalUserId externalTenantId } }
    totalCount
  }
}"#;

pub const USERS_BY_NAME: &str = r#"
query usersByName($firstNameFilter: String!, $lastNameFilter: String!) {
  users(filter: { firstName: { eq: $firstNameFilter }, lastName: { eq: $lastNameFilter } }) {
    edges { node { id email username firstName lastName externalUserId externalTenantId } }
    totalCount
  }
}"#;

pub const CREATE_USER: &str = r#"
mutation createOneUser($input: CreateOneUserInput!) {
  createOneUser(input: $input) {
    id firstName lastName email username externalTenantId externalUserId isActive isArchived
  }
}"#;

pub const UPDATE_USER: &str = r#"
mutation updateOneUser($input: UpdateOneUserInput!) {
  updateOneUser(input: $input) {
    id firstName lastName email username externalTenantId externalUserId isActive isArchived
  }
}"#;

pub const EMPLOYEES_BY_EXTERNAL_ID: &str = r#"
query employeeByExternalEmployeeId($externalEmployeeIdFilter: String!) {
  employees(filter: { externalEmployeeId: { eq: $externalEmployeeIdFilter } }) {
    edges { node { id externalEmployeeId } }
    totalCount
  }
}"#;

pub const EMPLOYEES_BY_NAME: &str = r#"
query employeeByName($firstNameFilter: String!, $lastNameFilter: String!) {
  employees(filter: { firstName: { eq: $firstNameFilter }, lastName: { eq: $lastNameFilter } }) {
    edges { node { id firstName lastName externalEmployeeId } }
    totalCount
  }
}"#;

pub const CREATE_EMPLOYEE: &str = r#"
mutation createOneEmployee($input: CreateOneEmployeeInput!) {
  createOneEmployee(input: $input) {
    id externalEmployeeId externalTenantId externalOrgId upworkOrganizationId
    upworkOrganizationName upworkId linkedInId firstName lastName userId
  }
}"#;

pub const UPDATE_EMPLOYEE: &str = r#"
mutation updateOneEmployee($input: UpdateOneEmployeeInput!) {
  updateOneEmployee(input: $input) {
    externalEmployeeId externalTenantId externalOrgId isActive isArchived
  }
}"#;

pub const COUNT_EMPLOYEES: &str = r#"
query countEmployees {
  employees { totalCount }
}"#;

pub const TENANTS_BY_EXTERNAL_ID: &str = r#"
query tenantByExternalTenantId($externalTenantIdFilter: String!) {
  tenants(filter: { externalTenantId: { eq: $externalTenantIdFilter } }) {
    edges { node { id isActive isArchived name externalTenantId } }
    totalCount
  }
}"#;

pub const TENANTS_BY_NAME: &str = r#"
query tenantByName($nameFilter: String!) {
  tenants(filter: { name: { eq: $nameFilter } }) {
    edges { node { id isActive isArchived name externalTenantId } }
    totalCount
  }
}"#;

pub const CREATE_TENANT: &str = r#"
mutation createOneTenant($input: CreateOneTenantInput!) {
  createOneTenant(input: $input) { id name externalTenantId isActive isArchived }
}"#;

pub const UPDATE_TENANT: &str = r#"
mutation updateOneTenant($input: UpdateOneTenantInput!) {
  updateOneTenant(input: $input) { id name externalTenantId isActive isArchived }
}"#;

pub const JOB_POSTS_BY_PROVIDER: &str = r#"
query jobPosts($providerCodeFilter: String!, $providerJobIdFilter: String!) {
  jobPosts(filter: { providerCode: { eq: $providerCodeFilter }, providerJobId: { eq: $providerJobIdFilter } }) {
    edges { node { id isActive isArchived } }
  }
}"#;

pub const EMPLOYEE_JOB_POSTS_BY_IDS: &str = r#"
query employeeJobPostsByEmployeeIdJobPostId($employeeIdFilter: String!, $jobPostIdFilter: String!) {
  employeeJobPosts(filter: { employeeId: { eq: $employeeIdFilter }, jobPostId: { eq: $jobPostIdFilter } }) {
    edges { node { id isActive isArchived } }
  }
}"#;

pub const EMPLOYEE_JOB_POSTS_PAGE: &str = r#"
query employeeJobPosts(
  $after: ConnectionCursor!
  $first: Int!
  $filter: EmployeeJobPostFilter!
  $sorting: [EmployeeJobPostSort!]
) {
  employeeJobPosts(paging: { after: $after, first: $first }, filter: $filter, sorting: $sorting) {
    totalCount
    pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
    edges {
      node {
        id isApplied appliedDate createdAt updatedAt isActive isArchived
        employee { id externalEmployeeId }
        providerCode providerJobId jobDateCreated jobStatus jobType
        jobPost {
          id providerCode providerJobId title description jobDateCreated jobStatus jobType
          url budget duration workload skills category subcategory country
          clientFeedback clientReviewsCount clientJobsPosted clientPastHires
          clientPaymentVerificationStatus searchCategory searchOccupation searchKeyword
        }
      }
    }
  }
}"#;

pub const UPDATE_EMPLOYEE_JOB_POST: &str = r#"
mutation updateOneEmployeeJobPost($input: UpdateOneEmployeeJobPostInput!) {
  updateOneEmployeeJobPost(input: $input) {
    employeeId jobPostId isActive isArchived isApplied appliedDate
  }
}"#;

pub const CREATE_EMPLOYEE_JOB_APPLICATION: &str = r#"
mutation createOneEmployeeJobApplication($input: CreateOneEmployeeJobApplicationInput!) {
  createOneEmployeeJobApplication(input: $input) {
    employeeId jobPostId proposal rate attachments appliedDate employeeJobPostId
    isActive isArchived providerCode providerJobId jobType jobStatus terms qa
  }
}"#;

pub const DELETE_CRITERIA: &str = r#"
mutation deleteManyUpworkJobsSearchCriteria($input: DeleteManyUpworkJobsSearchCriteriaInput!) {
  deleteManyUpworkJobsSearchCriteria(input: $input) { deletedCount }
}"#;

pub const CREATE_CRITERIA: &str = r#"
mutation createManyUpworkJobsSearchCriteria($input: CreateManyUpworkJobsSearchCriteriaInput!) {
  createManyUpworkJobsSearchCriteria(input: $input) { id }
}"#;

pub const TENANT_API_KEYS_BY_KEY: &str = r#"
query tenantApiKeysByKey($externalApiKeyFilter: String!) {
  tenantApiKeys(filter: { apiKey: { eq: $externalApiKeyFilter } }) {
    edges { node { id isActive isArchived } }
  }
}"#;

pub const UPDATE_TENANT_API_KEY: &str = r#"
mutation updateOneTenantApiKey($input: UpdateOneTenantApiKeyInput!) {
  updateOneTenantApiKey(input: $input) { openAiSecretKey openAiOrganizationId }
}"#;
