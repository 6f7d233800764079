//! HTTP handlers for the catalog API
//!
//! Every request loads its own snapshot of the collection from the configured
//! [`ProductSource`]; nothing is cached between requests.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::{
    CatalogError, CatalogMetadata, MetadataExtractor, ProductPage, ProductSource, QueryParams,
    QueryPipeline,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ProductSource>,
    pub pipeline: QueryPipeline,
    pub extractor: MetadataExtractor,
}

/// `GET /api/products`
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<ProductPage>, CatalogError> {
    let (query, malformed) = params.parse();
    for issue in &malformed {
        tracing::debug!(%issue, "tolerating malformed query parameter");
    }

    let products = state.source.load().await?;
    Ok(Json(state.pipeline.execute(&products, &query)))
}

/// `GET /api/categories-themes`
pub async fn categories_themes(
    State(state): State<AppState>,
) -> Result<Json<CatalogMetadata>, CatalogError> {
    let products = state.source.load().await?;
    Ok(Json(state.extractor.extract(&products)))
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "catalog-rs"
    }))
}
