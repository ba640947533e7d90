//! API service routes

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub mod auth;
pub mod toys;
pub mod upload;
pub mod users;

/// Largest accepted request body; sized for image uploads
const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/google", post(auth::google_login))
        .route("/api/toys", get(toys::list_toys).post(toys::create_toy))
        .route("/api/toys/nearby", get(toys::nearby_toys))
        .route("/api/toys/by-ids", post(toys::toys_by_ids))
        .route("/api/toys/:id", delete(toys::delete_toy))
        .route(
            "/api/users/:id",
            get(users::get_user).patch(users::update_profile),
        )
        .route("/api/users/:id/favorites", patch(users::toggle_favorite))
        .route("/api/upload", post(upload::upload_image))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}
