//! Service trait for obtaining the product collection

use crate::core::error::DataSourceError;
use crate::core::product::Product;
use async_trait::async_trait;

/// Source of the product collection
///
/// Implementations return a fresh snapshot on every call; the caller owns
/// it for the duration of one request. The framework is agnostic to where
/// the collection lives (local file, remote endpoint, memory).
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Load the full product collection
    async fn load(&self) -> Result<Vec<Product>, DataSourceError>;

    /// Human-readable origin, used in logs
    fn describe(&self) -> String;
}
