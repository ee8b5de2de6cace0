use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::utils::path::ensure_html_ext;
use crate::vfs::{FileTree, NodeKind};

use super::tools::ToolInvocation;

/// Conversational context for one dispatch turn.
///
/// `selected_file` resolves ambiguous references ("this file"); relative
/// names resolve against `current_folder`. Wire names are camelCase to
/// match the editor UI.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolContext {
    /// Folder the conversation is focused on, relative to the tenant root.
    #[serde(default)]
    pub current_folder: String,
    /// Tenant-relative path of the file currently open in the editor.
    #[serde(default)]
    pub selected_file: Option<String>,
}

/// Result of executing one tool call.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ToolOutcome {
    /// Tool name this outcome belongs to.
    pub tool: String,
    pub ok: bool,
    pub message: String,
    /// Tool-specific payload (file node, content, listing).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

fn required_str(args: &Value, field: &str) -> Result<String, AppError> {
    optional_str(args, field)
        .ok_or_else(|| AppError::InvalidArguments(format!("Missing required field '{field}'")))
}

fn optional_str(args: &Value, field: &str) -> Option<String> {
    args.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// File content argument: kept verbatim, and an empty string is a valid
/// value (an empty page), unlike name arguments.
fn content_str(args: &Value, field: &str) -> Option<String> {
    args.get(field).and_then(Value::as_str).map(str::to_string)
}

/// Resolve a tool-supplied name to a tenant-relative file path.
///
/// Explicit names resolve against the current folder unless they start with
/// `/`; a missing name falls back to the selected file, which is already a
/// full tenant-relative path. Names without an extension get `.html`.
fn resolve_target(ctx: &ToolContext, explicit: Option<String>) -> Result<String, AppError> {
    let path = match explicit {
        Some(name) => {
            if let Some(absolute) = name.strip_prefix('/') {
                absolute.to_string()
            } else if ctx.current_folder.is_empty() {
                name
            } else {
                format!("{}/{}", ctx.current_folder.trim_matches('/'), name)
            }
        }
        None => ctx
            .selected_file
            .clone()
            .ok_or_else(|| {
                AppError::InvalidArguments(
                    "No filename given and no file is selected".into(),
                )
            })?,
    };
    Ok(ensure_html_ext(&path))
}

/// Execute one tool call against the virtual file tree.
///
/// The dispatcher holds no state of its own; every operation delegates to
/// [`FileTree`], which enforces tenant isolation.
pub async fn dispatch(
    tree: &FileTree,
    tenant_id: &str,
    ctx: &ToolContext,
    call: &ToolInvocation,
) -> Result<ToolOutcome, AppError> {
    let args = &call.arguments;
    match call.name.as_str() {
        "create_file" => {
            let filename = required_str(args, "filename")?;
            let content = content_str(args, "content").ok_or_else(|| {
                AppError::InvalidArguments("Missing required field 'content'".into())
            })?;
            let path = resolve_target(ctx, Some(filename))?;
            let node = tree.write(tenant_id, &path, content.as_bytes()).await?;
            Ok(outcome(call, format!("Created '{path}'"), json!(node)))
        }
        "edit_file" => {
            let path = resolve_target(ctx, optional_str(args, "filename"))?;
            let updated = match content_str(args, "content") {
                // Full-replacement mode.
                Some(content) => {
                    tree.read(tenant_id, &path).await?;
                    content
                }
                // Targeted find/replace mode.
                None => {
                    let find = optional_str(args, "find").ok_or_else(|| {
                        AppError::InvalidArguments(
                            "edit_file requires either 'content' or 'find' and 'replace'".into(),
                        )
                    })?;
                    let replace = args
                        .get("replace")
                        .and_then(Value::as_str)
                        .ok_or_else(|| {
                            AppError::InvalidArguments(
                                "Missing required field 'replace'".into(),
                            )
                        })?;
                    let existing =
                        String::from_utf8_lossy(&tree.read(tenant_id, &path).await?).into_owned();
                    match existing.matches(find.as_str()).count() {
                        0 => {
                            return Err(AppError::Validation(format!(
                                "'find' text not present in '{path}'"
                            )));
                        }
                        1 => {}
                        n => {
                            return Err(AppError::Validation(format!(
                                "'find' text appears {n} times in '{path}'; it must be unique"
                            )));
                        }
                    }
                    existing.replacen(find.as_str(), replace, 1)
                }
            };
            let node = tree.write(tenant_id, &path, updated.as_bytes()).await?;
            Ok(outcome(call, format!("Edited '{path}'"), json!(node)))
        }
        "read_file" => {
            let path = resolve_target(ctx, optional_str(args, "filename"))?;
            let content = tree.read(tenant_id, &path).await?;
            Ok(outcome(
                call,
                format!("Read '{path}'"),
                json!({ "path": path, "content": String::from_utf8_lossy(&content) }),
            ))
        }
        "delete_file" => {
            let path = resolve_target(ctx, Some(required_str(args, "path")?))?;
            tree.delete(tenant_id, &path).await?;
            Ok(outcome(call, format!("Deleted '{path}'"), Value::Null))
        }
        "list_files" => {
            let nodes = tree.list(tenant_id, &ctx.current_folder).await?;
            let total = nodes.len();
            Ok(outcome(
                call,
                format!("{total} entries"),
                json!({ "files": nodes, "total": total }),
            ))
        }
        "rename_file" => {
            let old_name = required_str(args, "oldName")?;
            let new_name = ensure_html_ext(&required_str(args, "newName")?);
            let old_path = resolve_target(ctx, Some(old_name))?;
            let new_path = tree
                .rename(tenant_id, &old_path, &new_name, NodeKind::File)
                .await?;
            Ok(outcome(
                call,
                format!("Renamed '{old_path}' to '{new_path}'"),
                json!({ "new_path": new_path }),
            ))
        }
        other => Err(AppError::InvalidArguments(format!("Unknown tool '{other}'"))),
    }
}

fn outcome(call: &ToolInvocation, message: String, data: Value) -> ToolOutcome {
    ToolOutcome {
        tool: call.name.clone(),
        ok: true,
        message,
        data: (!data.is_null()).then_some(data),
    }
}
