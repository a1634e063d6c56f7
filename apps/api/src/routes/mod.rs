pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog;
use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/api/health", get(health::health_handler))
        // Catalog lookups
        .route("/api/video/:video_id", get(catalog::handle_get_video))
        .route(
            "/api/content/:video_id/article",
            get(catalog::handle_get_article),
        )
        .route(
            "/api/content/:video_id/insights",
            get(catalog::handle_get_insights),
        )
        // Pipeline stages
        .route(
            "/api/generate-persona",
            post(handlers::handle_generate_persona),
        )
        .route(
            "/api/generate-scoring-dimensions",
            post(handlers::handle_generate_scoring),
        )
        .route(
            "/api/content-pool-ranking",
            post(handlers::handle_content_pool_ranking),
        )
        .with_state(state)
}
