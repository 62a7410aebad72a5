//! HTTP surface: router assembly and shared layers

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::{config::ServerConfig, state::AppState, Error};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    let prefix = state.config.api_prefix();
    let server = &state.config.server;

    let mut router = Router::new()
        .route("/health", get(handlers::health::health))
        .nest(&prefix, routes::record_routes())
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(server.max_request_body_size))
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors_layer(server) {
        router = router.layer(cors);
    }

    router
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .with_state(state)
}

/// CORS for the configured origins. `None` when no origin is configured.
fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o.trim()).ok())
        .collect();
    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([axum::http::header::CONTENT_TYPE]),
    )
}

async fn route_not_found(uri: Uri) -> Response {
    Error::RouteNotFound(uri.path().to_string()).into_response()
}
