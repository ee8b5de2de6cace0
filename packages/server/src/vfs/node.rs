use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a node is a stored file or a synthetic folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// One entry in the derived file tree.
///
/// Folders are synthetic: they only exist as common prefixes of blob keys
/// and carry no metadata of their own. Trees are recomputed per request and
/// never persisted.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    /// Final path segment.
    #[schema(example = "about.html")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Path relative to the tenant root.
    #[schema(example = "docs/about.html")]
    pub path: String,
    /// Storage URL (files only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Size in bytes (files only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
    /// Immediate children, inferred from blob keys (folders only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    /// Whether the file is publicly served (no `unpublished` segment).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    /// Public serving path, present for published files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
}
