use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// One tool call produced by the upstream model.
///
/// Arguments arrive as raw JSON; the dispatcher validates presence of the
/// required fields and fails with `INVALID_ARGUMENTS` when they are missing.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ToolInvocation {
    /// Tool name, one of the six exported definitions.
    #[schema(example = "create_file")]
    pub name: String,
    /// Tool arguments as a JSON object.
    #[serde(default)]
    pub arguments: Value,
}

/// A tool definition in the shape inference providers expect.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON schema for the tool's arguments.
    pub parameters: Value,
}

/// The fixed tool surface handed to the upstream model.
pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "create_file",
            description: "Create a new file (or overwrite an existing one) with the given \
                content. Filenames without an extension get '.html' appended. Relative names \
                are created in the current folder.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "filename": { "type": "string" },
                    "content": { "type": "string" },
                },
                "required": ["filename", "content"],
            }),
        },
        ToolDefinition {
            name: "edit_file",
            description: "Edit an existing file. Either pass 'find' and 'replace' for a \
                targeted edit (the 'find' text must appear exactly once), or pass 'content' \
                to replace the whole file. When no filename is given, the currently selected \
                file is edited.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "filename": { "type": "string" },
                    "find": { "type": "string" },
                    "replace": { "type": "string" },
                    "content": { "type": "string" },
                },
            }),
        },
        ToolDefinition {
            name: "read_file",
            description: "Read the content of a file. When no filename is given, the \
                currently selected file is read.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "filename": { "type": "string" },
                },
            }),
        },
        ToolDefinition {
            name: "delete_file",
            description: "Delete a file. Relative paths refer to the current folder.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "path": { "type": "string" },
                },
                "required": ["path"],
            }),
        },
        ToolDefinition {
            name: "list_files",
            description: "List the files and folders in the current folder.",
            parameters: json!({
                "type": "object",
                "properties": {},
            }),
        },
        ToolDefinition {
            name: "rename_file",
            description: "Rename a file in place. 'newName' is a bare name without \
                directory components.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "oldName": { "type": "string" },
                    "newName": { "type": "string" },
                },
                "required": ["oldName", "newName"],
            }),
        },
    ]
}
