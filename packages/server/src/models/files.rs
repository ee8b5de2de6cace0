use serde::{Deserialize, Serialize};

use crate::vfs::{FileNode, NodeKind};

/// Query selecting a tenant-relative path. Empty or absent means the root.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PathQuery {
    /// Tenant-relative path.
    #[serde(default)]
    pub path: String,
}

/// Request body for creating or overwriting a file.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SaveFileRequest {
    /// Tenant-relative path of the file.
    #[schema(example = "docs/about.html")]
    pub path: String,
    /// Full file content.
    pub content: String,
}

/// Response DTO for reading a file.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FileContentResponse {
    pub path: String,
    pub content: String,
}

/// Response DTO for a listing.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ListFilesResponse {
    pub files: Vec<FileNode>,
    pub total: u64,
}

/// Request body for the rename endpoint. Field names follow the editor
/// UI's wire contract.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    /// Tenant-relative path of the file or folder to rename.
    #[schema(example = "docs/notes.html")]
    pub old_path: String,
    /// New final path segment (no directory components).
    #[schema(example = "summary.html")]
    pub new_name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameResponse {
    pub success: bool,
    pub message: String,
    /// New tenant-relative path.
    pub new_path: String,
}
