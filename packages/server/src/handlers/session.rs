use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthContext, SESSION_COOKIE};
use crate::models::session::{MeResponse, SessionResponse};
use crate::state::AppState;
use crate::utils::jwt;

#[utoipa::path(
    post,
    path = "/",
    tag = "Session",
    operation_id = "createSession",
    summary = "Mint a session cookie from gateway identity headers",
    description = "Signs the caller's gateway-provided identity into a short-lived cookie \
        so later requests (asset loads, page previews) do not need the headers.",
    responses(
        (status = 200, description = "Session issued; cookie set", body = SessionResponse),
        (status = 401, description = "Missing identity (UNAUTHORIZED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth, jar), fields(tenant_id = %auth.tenant_id))]
pub async fn create_session(
    auth: AuthContext,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let token = jwt::sign(
        &auth.tenant_id,
        &auth.user_id,
        &auth.user_email,
        &auth.user_role,
        auth.permissions.clone(),
        &state.config.auth.session_secret,
    )
    .map_err(|e| AppError::Internal(format!("session signing failed: {e}")))?;

    let expires_at = jwt::verify(&token, &state.config.auth.session_secret)
        .map_err(|e| AppError::Internal(format!("session verification failed: {e}")))?
        .exp as i64;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(24))
        .build();

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            tenant_id: auth.tenant_id,
            user_id: auth.user_id,
            expires_at,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Session",
    operation_id = "me",
    summary = "Describe the current identity",
    responses(
        (status = 200, description = "Current identity", body = MeResponse),
        (status = 401, description = "Missing identity (UNAUTHORIZED)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(tenant_id = %auth.tenant_id))]
pub async fn me(auth: AuthContext) -> Json<MeResponse> {
    Json(MeResponse {
        tenant_id: auth.tenant_id,
        user_id: auth.user_id,
        email: auth.user_email,
        role: auth.user_role,
        permissions: auth.permissions,
        is_proxied: auth.is_proxied,
    })
}
