//! In-memory implementation of ProductSource for testing and development

use crate::core::{DataSourceError, Product, ProductSource};
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory product source
///
/// Holds an immutable snapshot and hands out a copy on every load, the same
/// way the file and remote sources return a freshly decoded collection.
#[derive(Clone, Default)]
pub struct InMemoryProductSource {
    products: Arc<Vec<Product>>,
}

impl InMemoryProductSource {
    /// Create a new in-memory product source
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(products),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductSource for InMemoryProductSource {
    async fn load(&self) -> Result<Vec<Product>, DataSourceError> {
        Ok(self.products.as_ref().clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} products)", self.products.len())
    }
}
