//! End-to-end tests simulating a client of the catalog API
//!
//! These tests verify the complete flow from HTTP request to JSON response:
//! query-string parsing, source loading, pipeline execution and error bodies.

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use catalog::prelude::*;
use common::sample_catalog;
use serde_json::{Value, json};
use std::io::Write;

// =============================================================================
// Helpers
// =============================================================================

/// Source that always fails, standing in for an unreadable database
struct BrokenSource;

#[async_trait]
impl ProductSource for BrokenSource {
    async fn load(&self) -> Result<Vec<Product>, DataSourceError> {
        Err(DataSourceError::Io {
            path: "/var/lib/catalog/db.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        })
    }

    fn describe(&self) -> String {
        "broken".to_string()
    }
}

fn server_with(builder: ServerBuilder) -> TestServer {
    let app = builder.build().expect("router should build");
    TestServer::try_new(app).expect("Failed to create test server")
}

fn catalog_server(schema: Schema) -> TestServer {
    server_with(
        ServerBuilder::new()
            .with_source(InMemoryProductSource::new(sample_catalog()))
            .with_schema(schema),
    )
}

fn page_ids(body: &Value) -> Vec<String> {
    body["products"]
        .as_array()
        .expect("products should be an array")
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_products_default_page() {
    let server = catalog_server(Schema::Tiered);

    let response = server.get("/api/products").await;
    response.assert_status_ok();

    let page: ProductPage = response.json();
    assert_eq!(page.total, 12);
    assert_eq!(page.products.len(), 10);
}

#[tokio::test]
async fn test_products_filter_sort_and_limit() {
    let server = catalog_server(Schema::Tiered);

    let response = server
        .get("/api/products")
        .add_query_param("category", "Tech")
        .add_query_param("sortBy", "price,title")
        .add_query_param("sortDirection", "desc,asc")
        .add_query_param("limit", "3")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["total"], 5);
    assert_eq!(page_ids(&body), vec!["6", "9", "12"]);
}

#[tokio::test]
async fn test_products_cursor_pagination() {
    let server = catalog_server(Schema::Tiered);

    let first: Value = server
        .get("/api/products")
        .add_query_param("sortBy", "price")
        .add_query_param("limit", "4")
        .await
        .json();
    assert_eq!(page_ids(&first), vec!["10", "3", "7", "1"]);
    assert_eq!(first["total"], 12);

    let second: Value = server
        .get("/api/products")
        .add_query_param("sortBy", "price")
        .add_query_param("limit", "4")
        .add_query_param("lastItemId", "1")
        .await
        .json();
    assert_eq!(page_ids(&second), vec!["5", "8", "11", "2"]);
    assert_eq!(second["total"], 8);
}

#[tokio::test]
async fn test_products_search_and_price_range() {
    let server = catalog_server(Schema::Tiered);

    let body: Value = server
        .get("/api/products?search=NEAL&minPrice=10&maxPrice=15")
        .await
        .json();

    assert_eq!(body["total"], 2);
    assert_eq!(page_ids(&body), vec!["8", "11"]);
}

#[tokio::test]
async fn test_products_malformed_parameters_degrade() {
    let server = catalog_server(Schema::Tiered);

    let response = server
        .get("/api/products?limit=abc&minPrice=cheap&sortBy=rating")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["total"], 12);
    assert_eq!(body["products"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_products_response_shape() {
    let server = catalog_server(Schema::Tiered);

    let body: Value = server
        .get("/api/products?lastItemId=11")
        .await
        .json();

    assert_eq!(body["total"], 1);
    assert_eq!(
        body["products"][0],
        json!({
            "id": "12",
            "title": "Designing Data-Intensive Applications",
            "author": {"firstName": "Martin", "lastName": "Kleppmann"},
            "category": "Tech",
            "theme": "Systems",
            "tier": "gold",
            "price": 38.0,
            "createdAt": "2021-03-16T00:00:00Z"
        })
    );
}

#[tokio::test]
async fn test_legacy_schema_ignores_tier_parameter() {
    let server = catalog_server(Schema::Legacy);

    let body: Value = server
        .get("/api/products")
        .add_query_param("tier", "gold")
        .await
        .json();
    assert_eq!(body["total"], 12);
}

// =============================================================================
// Metadata
// =============================================================================

#[tokio::test]
async fn test_categories_themes_tiered() {
    let server = catalog_server(Schema::Tiered);

    let response = server.get("/api/categories-themes").await;
    response.assert_status_ok();

    let metadata: CatalogMetadata = response.json();
    assert_eq!(metadata.categories, vec!["Fiction", "Tech"]);
    assert_eq!(metadata.themes.len(), 7);
    assert_eq!(
        metadata.tiers,
        Some(vec!["gold".to_string(), "silver".to_string(), "bronze".to_string()])
    );
}

#[tokio::test]
async fn test_categories_themes_legacy_omits_tiers() {
    let server = catalog_server(Schema::Legacy);

    let body: Value = server.get("/api/categories-themes").await.json();
    assert!(body.get("tiers").is_none());
    assert_eq!(body["categories"], json!(["Fiction", "Tech"]));
}

// =============================================================================
// Sources and Errors
// =============================================================================

#[tokio::test]
async fn test_file_source_is_reloaded_per_request() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"products": [{{"id": "a", "title": "First", "author": {{"firstName": "X", "lastName": "Y"}}, "category": "Misc", "price": 1}}]}}"#
    )
    .unwrap();

    let server = server_with(ServerBuilder::new().with_source(FileProductSource::new(file.path())));

    let body: Value = server.get("/api/products").await.json();
    assert_eq!(body["total"], 1);

    std::fs::write(
        file.path(),
        r#"{"products": [
            {"id": "a", "title": "First", "author": {"firstName": "X", "lastName": "Y"}, "price": 1},
            {"id": "b", "title": "Second", "author": {"firstName": "X", "lastName": "Y"}, "price": 2}
        ]}"#,
    )
    .unwrap();

    let body: Value = server.get("/api/products").await.json();
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_unavailable_source_returns_500() {
    let server = server_with(ServerBuilder::new().with_source(BrokenSource));

    for path in ["/api/products", "/api/categories-themes"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["code"], "DATA_SOURCE_UNAVAILABLE");
        assert_eq!(body["message"], "Error reading database");
        assert!(!body.to_string().contains("/var/lib"));
    }
}

#[tokio::test]
async fn test_health_routes() {
    let server = catalog_server(Schema::Tiered);

    for path in ["/health", "/healthz"] {
        let body: Value = server.get(path).await.json();
        assert_eq!(body["status"], "ok");
    }
}

#[tokio::test]
async fn test_custom_routes_are_merged() {
    let extra = axum::Router::new().route("/version", axum::routing::get(|| async { "1" }));
    let server = server_with(
        ServerBuilder::new()
            .with_source(InMemoryProductSource::default())
            .with_custom_routes(extra),
    );

    server.get("/version").await.assert_text("1");
}
