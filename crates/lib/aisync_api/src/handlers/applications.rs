// @awa-component: INT-ApplicationEndpoints
//
//! Application workflow, image analysis and tenant API key handlers.

use aisync_core::AiSession;
use aisync_core::models::matching::{ApplyInput, TenantApiKeyInput};
use aisync_core::models::remote::{ImageAnalysisResult, TenantApiKeyRecord};
use axum::extract::{Multipart, Path, State};
use axum::{Extension, Json};
use serde_json::Value;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::context::RequestContext;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "file";

fn enabled(session: &AiSession) -> AppResult<()> {
    if session.is_enabled() {
        Ok(())
    } else {
        Err(AppError::Unavailable("AI integration is not configured".into()))
    }
}

/// `POST /integration/ai/applications/pre-process`
pub async fn pre_process_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(input): Json<ApplyInput>,
) -> AppResult<Json<Value>> {
    let session = ctx.session(&state.ai);
    enabled(&session)?;
    session
        .pre_process_employee_job_application(&input)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("employee {} is not synced", input.employee_id)))
}

/// `POST /integration/ai/applications/{id}/proposal`
pub async fn generate_proposal_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let session = ctx.session(&state.ai);
    enabled(&session)?;
    session
        .generate_proposal(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("application {id}")))
}

/// `GET /integration/ai/applications/{id}`
pub async fn get_application_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let session = ctx.session(&state.ai);
    enabled(&session)?;
    session
        .get_employee_job_application(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("application {id}")))
}

/// `POST /integration/ai/images/analyze` (multipart, field `file`)
pub async fn analyze_image_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    mut multipart: Multipart,
) -> AppResult<Json<Vec<ImageAnalysisResult>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("unreadable upload: {e}")))?;

        let results = ctx
            .session(&state.ai)
            .analyze_image(bytes.to_vec(), &filename)
            .await?;
        return Ok(Json(results));
    }
    Err(AppError::Validation(format!(
        "multipart field '{IMAGE_FIELD}' is required"
    )))
}

/// `POST /integration/ai/tenant-api-key`
pub async fn tenant_api_key_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(input): Json<TenantApiKeyInput>,
) -> AppResult<Json<TenantApiKeyRecord>> {
    let session = ctx.session(&state.ai);
    enabled(&session)?;
    session
        .update_tenant_api_key(&input)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("tenant api key".into()))
}
