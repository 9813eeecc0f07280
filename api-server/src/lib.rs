// Outfit stylist API server
//
// Keeps the image service credentials on the server and exposes the
// generation and edit orchestrators over HTTP.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use outfit_stylist_core::ImageService;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub mod config;
pub mod handlers;

/// Request body limit; wardrobe and outfit images travel inline as base64
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub image_service: Arc<dyn ImageService>,
}

impl AppState {
    pub fn new(image_service: Arc<dyn ImageService>) -> Self {
        Self { image_service }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    // Configure CORS (allow localhost development)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/outfits/generate", post(handlers::generate))
        .route("/api/v1/outfits/edit", post(handlers::edit))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
