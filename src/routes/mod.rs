//! HTTP route handlers for the page shell.
//!
//! The page itself is never cached because it embeds the live status line.
//! Public assets get a short static Cache-Control. Request tracing wraps
//! every route, including the asset fallback.

pub mod health;
pub mod home;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::{CACHE_CONTROL_PAGE, CACHE_CONTROL_STATIC};
use crate::http::static_files::create_public_service;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Page shell and status JSON - always revalidate
    let page_routes = Router::new()
        .route("/", get(home::index))
        .route("/status", get(health::status))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_PAGE),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    // Public assets (healthz.txt, css) served from the site root
    let static_routes = Router::new()
        .fallback_service(create_public_service(&state.config.paths))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATIC),
        ));

    Router::new()
        .merge(page_routes)
        .merge(health_routes)
        .merge(static_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
