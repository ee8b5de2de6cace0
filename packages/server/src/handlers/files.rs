use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthContext;
use crate::extractors::json::AppJson;
use crate::models::files::{
    FileContentResponse, ListFilesResponse, PathQuery, RenameRequest, RenameResponse,
    SaveFileRequest,
};
use crate::state::AppState;
use crate::vfs::FileNode;

#[utoipa::path(
    get,
    path = "/",
    tag = "Files",
    operation_id = "listFiles",
    summary = "List files and folders",
    description = "Returns the derived file tree under the given tenant-relative path. \
        Folders are synthetic, inferred from blob key prefixes.",
    params(PathQuery),
    responses(
        (status = 200, description = "File tree", body = ListFilesResponse),
        (status = 401, description = "Missing identity (UNAUTHORIZED)", body = ErrorBody),
        (status = 403, description = "Tenant boundary violation (ACCESS_DENIED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth), fields(tenant_id = %auth.tenant_id))]
pub async fn list_files(
    auth: AuthContext,
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<ListFilesResponse>, AppError> {
    let files = state.tree.list(&auth.tenant_id, &query.path).await?;
    let total = files.len() as u64;
    Ok(Json(ListFilesResponse { files, total }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Files",
    operation_id = "saveFile",
    summary = "Create or overwrite a file",
    request_body = SaveFileRequest,
    responses(
        (status = 200, description = "Stored file node", body = FileNode),
        (status = 400, description = "Invalid path (VALIDATION_ERROR, INVALID_NAME)", body = ErrorBody),
        (status = 401, description = "Missing identity (UNAUTHORIZED)", body = ErrorBody),
        (status = 403, description = "Tenant boundary violation (ACCESS_DENIED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth, payload), fields(tenant_id = %auth.tenant_id, path = %payload.path))]
pub async fn save_file(
    auth: AuthContext,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SaveFileRequest>,
) -> Result<Json<FileNode>, AppError> {
    let node = state
        .tree
        .write(&auth.tenant_id, &payload.path, payload.content.as_bytes())
        .await?;
    Ok(Json(node))
}

#[utoipa::path(
    get,
    path = "/content",
    tag = "Files",
    operation_id = "readFile",
    summary = "Read a file's content",
    params(PathQuery),
    responses(
        (status = 200, description = "File content", body = FileContentResponse),
        (status = 401, description = "Missing identity (UNAUTHORIZED)", body = ErrorBody),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth), fields(tenant_id = %auth.tenant_id, path = %query.path))]
pub async fn read_file(
    auth: AuthContext,
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<FileContentResponse>, AppError> {
    let content = state.tree.read(&auth.tenant_id, &query.path).await?;
    Ok(Json(FileContentResponse {
        path: query.path,
        content: String::from_utf8_lossy(&content).into_owned(),
    }))
}

#[utoipa::path(
    delete,
    path = "/",
    tag = "Files",
    operation_id = "deleteFile",
    summary = "Delete a file",
    params(PathQuery),
    responses(
        (status = 204, description = "File deleted"),
        (status = 401, description = "Missing identity (UNAUTHORIZED)", body = ErrorBody),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth), fields(tenant_id = %auth.tenant_id, path = %query.path))]
pub async fn delete_file(
    auth: AuthContext,
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<axum::http::StatusCode, AppError> {
    state.tree.delete(&auth.tenant_id, &query.path).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/rename",
    tag = "Files",
    operation_id = "renameFile",
    summary = "Rename a file or folder",
    description = "Replaces the final path segment. Folder rename copies every blob under \
        the old prefix before deleting any original, so a mid-operation failure never \
        loses data.",
    request_body = RenameRequest,
    responses(
        (status = 200, description = "Rename result", body = RenameResponse),
        (status = 400, description = "Missing or invalid fields (VALIDATION_ERROR, INVALID_NAME)", body = ErrorBody),
        (status = 401, description = "Missing identity (UNAUTHORIZED)", body = ErrorBody),
        (status = 403, description = "Tenant boundary violation (ACCESS_DENIED)", body = ErrorBody),
        (status = 404, description = "File or folder not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth, payload), fields(tenant_id = %auth.tenant_id, old_path = %payload.old_path))]
pub async fn rename(
    auth: AuthContext,
    State(state): State<AppState>,
    AppJson(payload): AppJson<RenameRequest>,
) -> Result<Json<RenameResponse>, AppError> {
    if payload.old_path.trim().is_empty() {
        return Err(AppError::Validation("Missing required field 'oldPath'".into()));
    }
    if payload.new_name.trim().is_empty() {
        return Err(AppError::Validation("Missing required field 'newName'".into()));
    }

    let new_path = state
        .tree
        .rename(
            &auth.tenant_id,
            &payload.old_path,
            &payload.new_name,
            payload.kind,
        )
        .await?;

    Ok(Json(RenameResponse {
        success: true,
        message: format!("Renamed '{}' to '{}'", payload.old_path, new_path),
        new_path,
    }))
}
