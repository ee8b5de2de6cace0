use serde::{Deserialize, Serialize};

use crate::ai::dispatcher::{ToolContext, ToolOutcome};
use crate::ai::tools::{ToolDefinition, ToolInvocation};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One conversation turn, as the chat UI holds it. Never mutated after
/// creation and retained for the session only; there is no durable chat
/// persistence.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Tool invocations the assistant attached to this turn, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolInvocation>>,
}

/// Request body for executing a batch of tool calls.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ToolBatchRequest {
    #[serde(default)]
    pub context: ToolContext,
    /// Conversation turns leading up to these calls. Accepted for logging
    /// and future context use; not forwarded anywhere.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Tool calls to execute, in order.
    pub tools: Vec<ToolInvocation>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ToolBatchResponse {
    pub results: Vec<ToolOutcome>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ToolDefinitionsResponse {
    pub tools: Vec<ToolDefinition>,
}
