//! Typed GraphQL filter values.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// One field comparison, serialized as a single-key object
/// (`{"eq": ..}`, `{"is": null}`, `{"in": [..]}`, `{"iLike": ..}`).
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Eq(String),
    /// `None` serializes as `{"is": null}`.
    Is(Option<bool>),
    In(Vec<String>),
    ILike(String),
    /// Passed through as given.
    Raw(Value),
}

impl Comparison {
    pub fn eq(value: impl Into<String>) -> Self {
        Comparison::Eq(value.into())
    }

    pub fn is_null() -> Self {
        Comparison::Is(None)
    }

    pub fn contains_ignore_case(fragment: &str) -> Self {
        Comparison::ILike(format!("%{fragment}%"))
    }
}

impl Serialize for Comparison {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Comparison::Raw(value) = self {
            return value.serialize(serializer);
        }
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Comparison::Eq(v) => map.serialize_entry("eq", v)?,
            Comparison::Is(v) => map.serialize_entry("is", v)?,
            Comparison::In(v) => map.serialize_entry("in", v)?,
            Comparison::ILike(v) => map.serialize_entry("iLike", v)?,
            Comparison::Raw(_) => {}
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostFieldFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Comparison>,
}

/// Filter for the `employeeJobPosts` listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeJobPostFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<Comparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<Comparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_applied: Option<Comparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_date_created: Option<Comparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_post: Option<JobPostFieldFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<Comparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_status: Option<Comparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_code: Option<Comparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Comparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<Comparison>,
}

/// Sort direction for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortField {
    pub field: &'static str,
    pub direction: SortDirection,
}
