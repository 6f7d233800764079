//! Local JSON database file

use super::decode_products;
use crate::core::{DataSourceError, Product, ProductSource};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads the product collection from a JSON file on every load
///
/// The file holds a `{"products": [...]}` document. Re-reading per request
/// means edits to the file are picked up without a restart.
#[derive(Debug, Clone)]
pub struct FileProductSource {
    path: PathBuf,
}

impl FileProductSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProductSource for FileProductSource {
    async fn load(&self) -> Result<Vec<Product>, DataSourceError> {
        let origin = self.path.display().to_string();
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| DataSourceError::Io {
                path: origin.clone(),
                source,
            })?;

        let products = decode_products(&bytes, &origin)?;
        tracing::debug!(path = %origin, count = products.len(), "loaded product database");
        Ok(products)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
