use axum::{extract::FromRequestParts, http::HeaderMap, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Gateway marker header: present on every request forwarded by the
/// trusted reverse proxy.
pub const PROXIED_FROM_HEADER: &str = "x-proxied-from";
pub const PROXY_SECRET_HEADER: &str = "x-proxy-secret";
pub const TENANT_ID_HEADER: &str = "x-tenant-id";
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_ROLE_HEADER: &str = "x-user-role";

pub const SESSION_COOKIE: &str = "pagesmith_session";

/// Tenant-scoped identity for one request.
///
/// Built once from trusted gateway headers (or the session cookie they
/// minted earlier) and never persisted. Everything downstream trusts this
/// context; the extractor is the only place identity is established.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub tenant_id: String,
    pub user_id: String,
    pub user_email: String,
    pub user_role: String,
    pub permissions: Vec<String>,
    /// Whether the request arrived through the trusted gateway.
    pub is_proxied: bool,
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = &state.config.auth;
        let headers = &parts.headers;
        let is_proxied = header(headers, PROXIED_FROM_HEADER).is_some();

        // Fail closed: production traffic must come through the gateway.
        if auth.production && !is_proxied {
            return Err(AppError::Unauthorized(
                "Requests must arrive through the trusted gateway".into(),
            ));
        }

        if !auth.proxy_secret.is_empty()
            && header(headers, PROXY_SECRET_HEADER) != Some(auth.proxy_secret.as_str())
        {
            return Err(AppError::Unauthorized("Invalid proxy secret".into()));
        }

        if let (Some(tenant_id), Some(user_id)) = (
            header(headers, TENANT_ID_HEADER),
            header(headers, USER_ID_HEADER),
        ) {
            return Ok(AuthContext {
                tenant_id: tenant_id.to_string(),
                user_id: user_id.to_string(),
                user_email: header(headers, USER_EMAIL_HEADER).unwrap_or("").to_string(),
                user_role: header(headers, USER_ROLE_HEADER)
                    .unwrap_or("member")
                    .to_string(),
                permissions: Vec::new(),
                is_proxied,
            });
        }

        // No identity headers: fall back to a previously issued session
        // cookie. There is no anonymous fallback identity, in any environment.
        let jar = CookieJar::from_headers(headers);
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            let claims = jwt::verify(cookie.value(), &auth.session_secret)
                .map_err(|_| AppError::Unauthorized("Invalid or expired session".into()))?;
            return Ok(AuthContext {
                tenant_id: claims.tenant_id,
                user_id: claims.user_id,
                user_email: claims.email,
                user_role: claims.role,
                permissions: claims.permissions,
                is_proxied,
            });
        }

        Err(AppError::Unauthorized(
            "Missing tenant identity headers".into(),
        ))
    }
}
