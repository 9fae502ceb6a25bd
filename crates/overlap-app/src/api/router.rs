use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method};
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use super::endpoint::{check_overlap, not_found, OverlapEndpoint};

pub const API_PREFIX: &str = "/api/v1";

/// Build the API router around a shared endpoint
pub fn router(endpoint: Arc<OverlapEndpoint>) -> Router {
    let api = Router::new().route("/overlap-check", post(check_overlap));

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(not_found)
        .layer(cors_layer())
        .with_state(endpoint)
}

/// Any origin and header; credentials are not allowed alongside a wildcard origin
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .expose_headers([
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::LAST_MODIFIED,
        ])
        .max_age(Duration::from_secs(60 * 60))
}
