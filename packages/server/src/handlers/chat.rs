use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::ai::dispatcher::{self, ToolOutcome};
use crate::ai::tools;
use crate::error::ErrorBody;
use crate::extractors::auth::AuthContext;
use crate::extractors::json::AppJson;
use crate::models::chat::{ToolBatchRequest, ToolBatchResponse, ToolDefinitionsResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/tools",
    tag = "Chat",
    operation_id = "listToolDefinitions",
    summary = "List the file tools exposed to the assistant",
    responses(
        (status = 200, description = "Tool definitions", body = ToolDefinitionsResponse),
        (status = 401, description = "Missing identity (UNAUTHORIZED)", body = ErrorBody),
    ),
)]
#[instrument(skip_all)]
pub async fn list_tool_definitions(_auth: AuthContext) -> Json<ToolDefinitionsResponse> {
    Json(ToolDefinitionsResponse {
        tools: tools::definitions(),
    })
}

#[utoipa::path(
    post,
    path = "/tools",
    tag = "Chat",
    operation_id = "runTools",
    summary = "Execute a batch of tool calls",
    description = "Runs each tool call in order against the caller's tenant namespace. \
        A failed call is reported in its result slot and does not stop the batch.",
    request_body = ToolBatchRequest,
    responses(
        (status = 200, description = "Per-call results, in request order", body = ToolBatchResponse),
        (status = 400, description = "Malformed batch (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Missing identity (UNAUTHORIZED)", body = ErrorBody),
    ),
)]
#[instrument(
    skip(state, auth, payload),
    fields(tenant_id = %auth.tenant_id, calls = payload.tools.len(), turns = payload.messages.len())
)]
pub async fn run_tools(
    auth: AuthContext,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ToolBatchRequest>,
) -> Json<ToolBatchResponse> {
    let mut results = Vec::with_capacity(payload.tools.len());
    for call in payload.tools {
        let name = call.name.clone();
        let outcome =
            match dispatcher::dispatch(&state.tree, &auth.tenant_id, &payload.context, &call).await
            {
            Ok(outcome) => outcome,
            Err(e) => {
                let (_, message) = e.parts();
                ToolOutcome {
                    tool: name,
                    ok: false,
                    message,
                    data: None,
                }
            }
        };
        results.push(outcome);
    }
    Json(ToolBatchResponse { results })
}
