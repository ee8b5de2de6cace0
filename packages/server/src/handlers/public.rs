use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::cache::PageCache;
use crate::state::AppState;
use crate::utils::path::{derive_title, has_unpublished_segment, normalize_rel_path};

/// Largest page body the cache will hold, in bytes.
const CACHE_MAX_BODY: usize = 64 * 1024;

/// Cached envelope for one published page.
#[derive(Serialize, Deserialize)]
struct CachedPage {
    /// Resolved storage key, kept so the content type survives the
    /// `.html` fallback.
    key: String,
    body: String,
}

/// Public publish gate: serves published pages at `/{tenant}/{path}`.
///
/// No authentication. Every miss is a plain 404; the response never
/// distinguishes "does not exist" from "exists but unpublished" or from a
/// backend failure, so the gate leaks nothing about the tenant's tree.
#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Public",
    operation_id = "servePage",
    summary = "Serve a published page",
    params(("slug" = String, Path, description = "Tenant-prefixed page path")),
    responses(
        (status = 200, description = "Page content", content_type = "text/html"),
        (status = 404, description = "Not published or not found"),
    ),
)]
#[instrument(skip(state))]
pub async fn serve_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let trimmed = slug.trim_matches('/');
    if trimmed.is_empty() {
        return not_found();
    }

    // Deny before any storage round trip. The exact-segment rule means
    // `unpublishedx` stays servable.
    if has_unpublished_segment(trimmed) {
        return not_found();
    }

    let normalized = match normalize_rel_path(trimmed) {
        Ok(n) if !n.is_empty() => n,
        _ => return not_found(),
    };

    let cache_key = format!("pub:{normalized}");
    if let Some(raw) = state.cache.get(&cache_key).await
        && let Ok(page) = serde_json::from_str::<CachedPage>(&raw)
    {
        return page_response(&page.key, page.body.into_bytes());
    }

    let (key, body) = match fetch_with_html_fallback(&state, &normalized).await {
        Some(hit) => hit,
        None => return not_found(),
    };

    let body = inject_title(&key, body, &normalized);

    if body.len() < CACHE_MAX_BODY
        && let Ok(text) = std::str::from_utf8(&body)
    {
        let envelope = CachedPage {
            key: key.clone(),
            body: text.to_string(),
        };
        if let Ok(raw) = serde_json::to_string(&envelope) {
            state
                .cache
                .set_ex(&cache_key, &raw, state.config.cache.publish_ttl_secs)
                .await;
        }
    }

    page_response(&key, body)
}

/// Exact key first, then the `.html`-suffixed fallback.
///
/// A backend failure is logged and collapses to a miss; the public surface
/// shows the same 404 either way.
async fn fetch_with_html_fallback(state: &AppState, normalized: &str) -> Option<(String, Vec<u8>)> {
    let mut candidates = vec![normalized.to_string()];
    if !normalized.ends_with(".html") {
        candidates.push(format!("{normalized}.html"));
    }

    for key in candidates {
        match state.blob_store.get(&key).await {
            Ok(body) => return Some((key, body)),
            Err(common::storage::StorageError::NotFound(_)) => continue,
            Err(e) => {
                tracing::warn!(key = %key, "Publish gate fetch failed: {e}");
                return None;
            }
        }
    }
    None
}

/// Add a `<title>` to HTML pages that have none, derived from the path
/// with the tenant segment dropped.
fn inject_title(key: &str, body: Vec<u8>, normalized: &str) -> Vec<u8> {
    if !key.ends_with(".html") {
        return body;
    }
    let Ok(text) = std::str::from_utf8(&body) else {
        return body;
    };
    if text.to_ascii_lowercase().contains("<title") {
        return body;
    }

    let page_path = match normalized.split_once('/') {
        Some((_tenant, rest)) => rest,
        None => normalized,
    };
    let title = derive_title(page_path);
    let tag = format!("<title>{title}</title>");

    let lower = text.to_ascii_lowercase();
    let injected = if let Some(pos) = lower.find("<head>") {
        let at = pos + "<head>".len();
        format!("{}{}{}", &text[..at], tag, &text[at..])
    } else {
        format!("{tag}{text}")
    };
    injected.into_bytes()
}

fn page_response(key: &str, body: Vec<u8>) -> Response {
    let content_type = mime_guess::from_path(key)
        .first()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "text/html; charset=utf-8".to_string());

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
            (header::CACHE_CONTROL, "public, max-age=60".to_string()),
        ],
        body,
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Page not found").into_response()
}
