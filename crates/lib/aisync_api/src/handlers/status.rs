//! Integration status endpoint.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::AppState;
use crate::middleware::context::RequestContext;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub version: &'static str,
    pub enabled: bool,
    pub tenant_id: Option<String>,
    pub organization_id: Option<String>,
    /// Whether tenant credentials were installed for this request.
    pub tenant_credentials: bool,
    pub correlation_id: String,
}

/// `GET|POST /integration/ai/status`: what the request context resolved to.
pub async fn status_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: aisync_core::version(),
        enabled: state.ai.is_enabled(),
        tenant_credentials: ctx.has_tenant_credentials(),
        tenant_id: ctx.tenant_id,
        organization_id: ctx.organization_id,
        correlation_id: ctx.correlation_id,
    })
}
