//! Core module containing the product model, query pipeline and metadata extraction

pub mod collation;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod product;
pub mod query;
pub mod service;

pub use error::{CatalogError, ConfigError, DataSourceError, ErrorResponse};
pub use metadata::{CatalogMetadata, MetadataExtractor};
pub use pipeline::QueryPipeline;
pub use product::{Author, Product, Schema};
pub use query::{
    DEFAULT_LIMIT, MalformedParameter, ProductPage, ProductQuery, QueryParams, SortCriterion,
    SortDirection, SortKey,
};
pub use service::ProductSource;
