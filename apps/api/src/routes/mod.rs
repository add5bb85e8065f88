pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware::map_response,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::errors::{default_description, AppError};
use crate::jobs::handlers;
use crate::middleware::render_http_errors;
use crate::state::AppState;

/// Every route is served under each of these prefixes.
pub const PREFIXES: [&str; 2] = ["", "/api"];

/// OPTIONS on any route: empty 200, no storage access.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn not_found() -> AppError {
    let status = StatusCode::NOT_FOUND;
    AppError::Http {
        status,
        message: default_description(status).to_string(),
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    PREFIXES
        .iter()
        .fold(Router::new(), |router, prefix| {
            router
                .route(
                    &format!("{prefix}/health"),
                    get(health::health_handler).options(preflight),
                )
                .route(
                    &format!("{prefix}/jobs/"),
                    get(handlers::handle_list_jobs).options(preflight),
                )
                .route(
                    &format!("{prefix}/jobs/post/"),
                    post(handlers::handle_create_job).options(preflight),
                )
                .route(
                    &format!("{prefix}/jobs/:id/"),
                    get(handlers::handle_get_job)
                        .put(handlers::handle_update_job)
                        .delete(handlers::handle_delete_job)
                        .options(preflight),
                )
        })
        .fallback(not_found)
        .layer(map_response(render_http_errors))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
