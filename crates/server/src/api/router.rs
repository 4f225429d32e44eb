use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

use super::handlers;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Search endpoints
        .route("/search", get(handlers::unified_search))
        .route("/appstore", get(handlers::search_appstore))
        .route("/playstore", get(handlers::search_playstore))
        // Trending endpoints
        .route("/trending", get(handlers::trending_free))
        .route("/trending/paid", get(handlers::trending_paid))
        // App detail
        .route("/app/{store}/{id}", get(handlers::get_app_detail))
        // Image proxy
        .route("/image-proxy", get(handlers::proxy_image))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
