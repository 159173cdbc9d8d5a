//! Route configuration.
//!
//! Public reads are unauthenticated; the admin save and upload routes sit on
//! the same router since operator authentication is handled at the edge.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use folio_core::Config;

use crate::handlers::{content, health, upload};
use crate::state::AppState;

// Multipart framing overhead on top of the configured file size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router with all routes and layers attached.
pub fn build_router(state: Arc<AppState>) -> Router<()> {
    let cors = setup_cors(&state.config);
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/api/v0/content", get(content::get_content))
        .route(
            "/api/v0/content/{section}",
            get(content::get_section).put(content::save_section),
        )
        .route("/api/v0/uploads", post(upload::upload))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn setup_cors(config: &Config) -> CorsLayer {
    if config.cors_origins.contains(&"*".to_string()) {
        if config.is_production() {
            tracing::warn!("CORS configured to allow all origins in production");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::PUT, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::PUT, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    }
}
