//! HTTP route handlers.

pub mod documents;
pub mod health;
pub mod proforma;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();
    let max_upload_bytes = state.config.max_upload_bytes;

    let mut router = Router::new().nest("/api", api_routes(max_upload_bytes));

    // Built front-end, with client-side routes falling back to index.html.
    if static_dir.is_dir() {
        info!("Serving front-end from {}", static_dir.display());
        let index = static_dir.join("index.html");
        router = router.fallback_service(ServeDir::new(&static_dir).not_found_service(ServeFile::new(index)));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::routes())
        .merge(proforma::routes().layer(DefaultBodyLimit::max(max_upload_bytes)))
        .merge(documents::routes())
}
