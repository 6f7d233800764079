//! Router builder utilities for catalog routes

use crate::server::handlers::{AppState, categories_themes, health_check, list_products};
use axum::{Router, routing::get};

/// Build the catalog API routes
///
/// - GET /api/products - Filtered, sorted, paginated product page
/// - GET /api/categories-themes - Distinct categories, themes and tiers
pub fn build_catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/categories-themes", get(categories_themes))
        .with_state(state)
}

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}
