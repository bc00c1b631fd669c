// @awa-component: INT-JobPostEndpoints
//
//! Job-post listing and matching handlers.

use aisync_core::models::matching::{
    ApplyInput, ApplyResult, EmployeeJobPost, JobPostListQuery, Pagination, UpdateAppliedResult,
    VisibilityInput,
};
use axum::extract::State;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::handlers::employees::UpdatedResponse;
use crate::middleware::context::RequestContext;

/// `POST /integration/ai/job-posts/list`
///
/// A POST so list filters can be sent as arrays.
pub async fn list_job_posts_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(query): Json<JobPostListQuery>,
) -> AppResult<Json<Pagination<EmployeeJobPost>>> {
    let page = ctx.session(&state.ai).employee_job_posts(&query).await?;
    Ok(Json(page))
}

/// `POST /integration/ai/job-posts/apply`
pub async fn apply_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(input): Json<ApplyInput>,
) -> AppResult<Json<ApplyResult>> {
    Ok(Json(ctx.session(&state.ai).apply(&input).await?))
}

/// `POST /integration/ai/job-posts/visibility`
pub async fn visibility_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(input): Json<VisibilityInput>,
) -> AppResult<Json<UpdatedResponse>> {
    let updated = ctx.session(&state.ai).update_visibility(&input).await?;
    Ok(Json(UpdatedResponse { updated }))
}

/// `POST /integration/ai/job-posts/applied`
pub async fn applied_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(input): Json<ApplyInput>,
) -> AppResult<Json<UpdateAppliedResult>> {
    Ok(Json(ctx.session(&state.ai).update_applied(&input).await?))
}
