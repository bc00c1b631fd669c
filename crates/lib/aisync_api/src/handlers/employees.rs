// @awa-component: INT-SyncEndpoints
//
//! Employee, tenant and criteria sync handlers.

use aisync_core::events::IntegrationEvent;
use aisync_core::models::local::{LocalCriterion, LocalEmployee, LocalTenant};
use aisync_core::models::matching::EmployeeStatusInput;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::context::RequestContext;

#[derive(Debug, Deserialize)]
pub struct SyncEmployeesRequest {
    pub employees: Vec<LocalEmployee>,
}

#[derive(Debug, Deserialize)]
pub struct CriteriaRequest {
    pub employee: LocalEmployee,
    #[serde(default)]
    pub criteria: Vec<LocalCriterion>,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub synced: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub updated: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSyncResponse {
    pub remote_id: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaResponse {
    pub replicated: bool,
    pub remote_employee_id: Option<String>,
    pub deleted: u64,
    pub created: usize,
}

#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

/// `POST /integration/ai/employees/sync`
pub async fn sync_employees_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<SyncEmployeesRequest>,
) -> AppResult<Json<SyncResponse>> {
    let synced = ctx.session(&state.ai).sync_employees(&body.employees).await?;
    Ok(Json(SyncResponse { synced }))
}

/// `POST /integration/ai/tenants/sync`
pub async fn sync_tenant_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(tenant): Json<LocalTenant>,
) -> AppResult<Json<TenantSyncResponse>> {
    let remote_id = ctx.session(&state.ai).sync_tenant(&tenant).await?;
    Ok(Json(TenantSyncResponse { remote_id }))
}

/// `POST /integration/ai/employees/criteria`: full replace of the
/// employee's search criteria.
pub async fn sync_criteria_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<CriteriaRequest>,
) -> AppResult<Json<CriteriaResponse>> {
    let summary = ctx
        .session(&state.ai)
        .sync_employee_job_search_criteria(&body.employee, &body.criteria)
        .await?;

    Ok(Json(match summary {
        Some(s) => CriteriaResponse {
            replicated: true,
            remote_employee_id: Some(s.remote_employee_id),
            deleted: s.deleted,
            created: s.created,
        },
        None => CriteriaResponse::default(),
    }))
}

/// `POST /integration/ai/employees/status`
pub async fn employee_status_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(input): Json<EmployeeStatusInput>,
) -> AppResult<Json<UpdatedResponse>> {
    let updated = ctx
        .session(&state.ai)
        .update_employee_status(&input)
        .await?;
    Ok(Json(UpdatedResponse { updated }))
}

fn event_scope(ctx: &RequestContext) -> AppResult<(String, String)> {
    match (&ctx.tenant_id, &ctx.organization_id) {
        (Some(t), Some(o)) => Ok((t.clone(), o.clone())),
        _ => Err(AppError::Validation(
            "tenantId and organizationId are required".into(),
        )),
    }
}

async fn enqueue(state: &AppState, event: IntegrationEvent) -> AppResult<(StatusCode, Json<QueuedResponse>)> {
    if !state.events.publish(event).await {
        return Err(AppError::Unavailable("event worker is not running".into()));
    }
    Ok((StatusCode::ACCEPTED, Json(QueuedResponse { queued: true })))
}

/// `POST /integration/ai/employees/changed`: queue a background sync.
pub async fn employees_changed_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<SyncEmployeesRequest>,
) -> AppResult<(StatusCode, Json<QueuedResponse>)> {
    let (tenant_id, organization_id) = event_scope(&ctx)?;
    enqueue(
        &state,
        IntegrationEvent::EmployeesChanged {
            tenant_id,
            organization_id,
            employees: body.employees,
        },
    )
    .await
}

/// `POST /integration/ai/employees/criteria/changed`: queue a background
/// criteria replacement.
pub async fn criteria_changed_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<CriteriaRequest>,
) -> AppResult<(StatusCode, Json<QueuedResponse>)> {
    let (tenant_id, organization_id) = event_scope(&ctx)?;
    enqueue(
        &state,
        IntegrationEvent::CriteriaChanged {
            tenant_id,
            organization_id,
            employee: body.employee,
            criteria: body.criteria,
        },
    )
    .await
}
