pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::baas::handlers as baas;
use crate::matching::handlers as matching;
use crate::rewrite::handlers as rewrite;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/analyze", post(matching::handle_analyze))
        .route("/api/rewrite-bullets", post(rewrite::handle_rewrite_bullets))
        // Back4App proxy
        .route("/api/app-id", get(baas::handle_app_id))
        .route("/api/validate-back4app", get(baas::handle_validate))
        .route("/api/create-class", post(baas::handle_create_class))
        .route("/api/upload-file", post(baas::handle_upload_file))
        .with_state(state)
}
