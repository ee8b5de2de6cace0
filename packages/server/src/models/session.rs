use serde::Serialize;

/// Response DTO for issuing a session cookie.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SessionResponse {
    pub tenant_id: String,
    pub user_id: String,
    /// Unix timestamp when the session expires.
    pub expires_at: i64,
}

/// Response DTO for the current identity.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    pub tenant_id: String,
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub is_proxied: bool,
}
