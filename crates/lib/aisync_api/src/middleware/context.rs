// @awa-component: INT-RequestContext
//
//! Per-request tenant credential context.
//!
//! Tenant and organization come from the `tenant-id` / `organization-id`
//! headers, falling back to `tenantId` / `organizationId` in a JSON body.
//! Every request starts from a fresh overlay at the default credentials;
//! tenant credentials are installed only when the cached settings carry
//! both `apiKey` and `apiSecret`. Settings failures fail open to the
//! default credentials.

use aisync_core::credentials::ConfigOverlay;
use aisync_core::remote::headers::{
    X_API_KEY, X_APP_ID, X_OPENAI_ORGANIZATION_ID, X_OPENAI_SECRET_KEY,
};
use aisync_core::{AiSession, IntegrationAi};
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;

pub const TENANT_ID_HEADER: &str = "tenant-id";
pub const ORGANIZATION_ID_HEADER: &str = "organization-id";
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Largest JSON body buffered to look for tenant fields.
pub const MAX_CONTEXT_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Inbound copies of the outbound credential headers. Never trusted.
const CREDENTIAL_HEADERS: [&str; 4] = [
    X_APP_ID,
    X_API_KEY,
    X_OPENAI_SECRET_KEY,
    X_OPENAI_ORGANIZATION_ID,
];

/// Stored in request extensions for handlers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub correlation_id: String,
    pub tenant_id: Option<String>,
    pub organization_id: Option<String>,
    pub overlay: ConfigOverlay,
}

impl RequestContext {
    pub fn session(&self, ai: &IntegrationAi) -> AiSession {
        ai.session_for(&self.overlay)
    }

    pub fn has_tenant_credentials(&self) -> bool {
        self.overlay.has_override()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn body_field(body: &Value, name: &str) -> Option<String> {
    match body.get(name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Axum middleware: resolves the tenant credential context and inserts a
/// [`RequestContext`] into request extensions.
pub async fn request_context(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let correlation_id = Uuid::now_v7().to_string();

    for name in CREDENTIAL_HEADERS {
        request.headers_mut().remove(name);
    }

    let mut tenant_id = header(request.headers(), TENANT_ID_HEADER);
    let mut organization_id = header(request.headers(), ORGANIZATION_ID_HEADER);

    if (tenant_id.is_none() || organization_id.is_none()) && is_json(request.headers()) {
        let (parts, body) = request.into_parts();
        let bytes = match axum::body::to_bytes(body, MAX_CONTEXT_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return AppError::Validation(format!("unreadable request body: {e}")).into_response();
            }
        };
        if let Ok(json) = serde_json::from_slice::<Value>(&bytes) {
            tenant_id = tenant_id.or_else(|| body_field(&json, "tenantId"));
            organization_id = organization_id.or_else(|| body_field(&json, "organizationId"));
        }
        request = Request::from_parts(parts, Body::from(bytes));
    }

    let overlay = match state
        .resolver
        .overlay_for(tenant_id.as_deref(), organization_id.as_deref())
        .await
    {
        Ok(overlay) => overlay,
        Err(e) => {
            warn!(
                correlation_id = %correlation_id,
                tenant_id = tenant_id.as_deref().unwrap_or_default(),
                error = %e,
                "settings lookup failed, using default credentials"
            );
            state.resolver.default_overlay()
        }
    };

    let span = info_span!(
        "request",
        correlation_id = %correlation_id,
        tenant_id = tenant_id.as_deref().unwrap_or_default(),
        method = %request.method(),
        path = %request.uri().path(),
    );

    request.extensions_mut().insert(RequestContext {
        correlation_id: correlation_id.clone(),
        tenant_id,
        organization_id,
        overlay,
    });

    let mut response = async move {
        let response = next.run(request).await;
        debug!(status = response.status().as_u16(), "request completed");
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}
