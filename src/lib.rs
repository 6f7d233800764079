//! # catalog-rs
//!
//! A read-only query service over a product catalog.
//!
//! ## Features
//!
//! - **Query Pipeline**: category/tier/price filters, free-text search,
//!   stable multi-key sort, cursor pagination and a page limit, applied in a
//!   fixed order
//! - **Metadata Extraction**: distinct categories, themes and tiers
//! - **Pluggable Sources**: local JSON file, remote endpoint, or memory
//! - **Schema Variants**: legacy catalogs without tiers and tiered catalogs
//!   share one pipeline
//! - **Lenient Parameters**: malformed parameters degrade to defaults
//!   instead of failing the request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! let products = vec![
//!     Product::new("1", "Dune", Author::new("Frank", "Herbert"), 9.99)
//!         .with_category("Fiction"),
//! ];
//!
//! let params = QueryParams {
//!     category: Some("Fiction".to_string()),
//!     sort_by: Some("price,title".to_string()),
//!     sort_direction: Some("desc".to_string()),
//!     ..Default::default()
//! };
//! let (query, _malformed) = params.parse();
//!
//! let page = QueryPipeline::new(Schema::Tiered).execute(&products, &query);
//! assert_eq!(page.total, 1);
//!
//! // Or serve it over HTTP
//! ServerBuilder::new()
//!     .with_source(FileProductSource::new("db.json"))
//!     .serve("127.0.0.1:5005")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Author, CatalogError, CatalogMetadata, ConfigError, DEFAULT_LIMIT, DataSourceError,
        ErrorResponse, MalformedParameter, MetadataExtractor, Product, ProductPage, ProductQuery,
        ProductSource, QueryParams, QueryPipeline, Schema, SortCriterion, SortDirection, SortKey,
    };

    // === Storage ===
    pub use crate::storage::{FileProductSource, InMemoryProductSource};
    #[cfg(feature = "remote")]
    pub use crate::storage::RemoteProductSource;

    // === Config ===
    pub use crate::config::{CatalogConfig, ServerConfig, SourceConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
