use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::files::list_files)
                .post(handlers::files::save_file)
                .delete(handlers::files::delete_file),
        )
        .route("/content", get(handlers::files::read_file))
        .route("/rename", post(handlers::files::rename))
}

pub fn chat_routes() -> Router<AppState> {
    Router::new().route(
        "/tools",
        get(handlers::chat::list_tool_definitions).post(handlers::chat::run_tools),
    )
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::session::create_session))
        .route("/me", get(handlers::session::me))
}

pub fn diag_routes() -> Router<AppState> {
    Router::new()
        .route("/storage", get(handlers::diag::probe_storage))
        .route("/cache", get(handlers::diag::probe_cache))
}
