// @awa-component: INT-LocalSchema
//
//! Local records handed to the sync engine by the system of record.

use serde::{Deserialize, Serialize};

use super::remote::{CriterionInput, EmployeeInput, TenantInput, UserInput};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalUser {
    pub id: String,
    pub tenant_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalOrganization {
    pub upwork_organization_id: Option<String>,
    pub upwork_organization_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalEmployee {
    pub id: String,
    pub tenant_id: String,
    pub organization_id: String,
    pub is_active: bool,
    pub upwork_id: Option<String>,
    pub linked_in_id: Option<String>,
    pub user: LocalUser,
    #[serde(default)]
    pub organization: LocalOrganization,
}

impl LocalEmployee {
    /// Remote payload for the owning user.
    ///
    /// `archive_inactive` mirrors `isActive` into `isArchived`; criteria sync
    /// passes `false` and never archives.
    pub fn user_input(&self, archive_inactive: bool) -> UserInput {
        UserInput {
            first_name: self.user.first_name.clone(),
            last_name: self.user.last_name.clone(),
            email: self.user.email.clone(),
            username: self.user.username.clone(),
            external_tenant_id: Some(self.user.tenant_id.clone()),
            external_user_id: Some(self.user.id.clone()),
            is_active: Some(self.is_active),
            is_archived: Some(archive_inactive && !self.is_active),
        }
    }

    /// Remote payload for the employee, linked to the already-synced remote user.
    pub fn employee_input(&self, remote_user_id: &str, archive_inactive: bool) -> EmployeeInput {
        EmployeeInput {
            external_employee_id: Some(self.id.clone()),
            external_tenant_id: Some(self.tenant_id.clone()),
            external_org_id: Some(self.organization_id.clone()),
            upwork_organization_id: self.organization.upwork_organization_id.clone(),
            upwork_organization_name: self.organization.upwork_organization_name.clone(),
            upwork_id: self.upwork_id.clone(),
            linked_in_id: self.linked_in_id.clone(),
            is_active: Some(self.is_active),
            is_archived: Some(archive_inactive && !self.is_active),
            first_name: self.user.first_name.clone(),
            last_name: self.user.last_name.clone(),
            user_id: Some(remote_user_id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalTenant {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl LocalTenant {
    pub fn tenant_input(&self) -> TenantInput {
        TenantInput {
            name: Some(self.name.clone()),
            external_tenant_id: Some(self.id.clone()),
            is_active: Some(self.is_active),
            is_archived: Some(!self.is_active),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: Option<String>,
}

/// One saved job-search criterion for an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalCriterion {
    pub keyword: String,
    pub job_type: String,
    pub category_id: Option<String>,
    pub category: Option<NamedRef>,
    pub occupation_id: Option<String>,
    pub occupation: Option<NamedRef>,
}

impl LocalCriterion {
    /// Remote row for this criterion. Empty names and ids are left out.
    pub fn to_remote(&self, remote_employee_id: &str) -> CriterionInput {
        fn named(r: &Option<NamedRef>) -> Option<String> {
            r.as_ref()
                .and_then(|r| r.name.clone())
                .filter(|n| !n.is_empty())
        }
        fn id(v: &Option<String>) -> Option<String> {
            v.clone().filter(|v| !v.is_empty())
        }

        CriterionInput {
            employee_id: remote_employee_id.to_string(),
            is_active: true,
            is_archived: false,
            job_type: self.job_type.clone(),
            keyword: self.keyword.clone(),
            category: named(&self.category),
            category_id: id(&self.category_id),
            occupation: named(&self.occupation),
            occupation_id: id(&self.occupation_id),
        }
    }
}
