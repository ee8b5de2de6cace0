mod api;

use utoipa_axum::router::OpenApiRouter;

use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/files", api::file_routes().into())
        .nest("/chat", api::chat_routes().into())
        .nest("/session", api::session_routes().into())
        .nest("/diag", api::diag_routes().into())
}
