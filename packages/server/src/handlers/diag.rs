use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tracing::instrument;

use crate::error::ErrorBody;
use crate::extractors::auth::AuthContext;
use crate::state::AppState;

/// Result of probing one backing service.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProbeResponse {
    pub service: &'static str,
    pub ok: bool,
    /// Failure detail, present only when `ok` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[utoipa::path(
    get,
    path = "/storage",
    tag = "Diagnostics",
    operation_id = "probeStorage",
    summary = "Probe blob store connectivity",
    responses(
        (status = 200, description = "Probe result", body = ProbeResponse),
        (status = 401, description = "Missing identity (UNAUTHORIZED)", body = ErrorBody),
    ),
)]
#[instrument(skip_all)]
pub async fn probe_storage(_auth: AuthContext, State(state): State<AppState>) -> Json<ProbeResponse> {
    let result = state.blob_store.list("", Some(1)).await;
    Json(match result {
        Ok(_) => ProbeResponse {
            service: "storage",
            ok: true,
            error: None,
        },
        Err(e) => ProbeResponse {
            service: "storage",
            ok: false,
            error: Some(e.to_string()),
        },
    })
}

#[utoipa::path(
    get,
    path = "/cache",
    tag = "Diagnostics",
    operation_id = "probeCache",
    summary = "Probe cache connectivity",
    responses(
        (status = 200, description = "Probe result", body = ProbeResponse),
        (status = 401, description = "Missing identity (UNAUTHORIZED)", body = ErrorBody),
    ),
)]
#[instrument(skip_all)]
pub async fn probe_cache(_auth: AuthContext, State(state): State<AppState>) -> Json<ProbeResponse> {
    Json(match state.cache.ping().await {
        Ok(()) => ProbeResponse {
            service: "cache",
            ok: true,
            error: None,
        },
        Err(e) => ProbeResponse {
            service: "cache",
            ok: false,
            error: Some(e),
        },
    })
}
