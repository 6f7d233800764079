//! Product source implementations for different backends

pub mod file;
pub mod in_memory;
#[cfg(feature = "remote")]
pub mod remote;

pub use file::FileProductSource;
pub use in_memory::InMemoryProductSource;
#[cfg(feature = "remote")]
pub use remote::RemoteProductSource;

use crate::config::SourceConfig;
use crate::core::{ConfigError, DataSourceError, Product, ProductSource};
use serde::Deserialize;
use std::sync::Arc;

/// Accepted payload layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductsDocument {
    Wrapped { products: Vec<Product> },
    Bare(Vec<Product>),
}

/// Decode a product collection from a JSON payload
///
/// `origin` names the file or URL for error messages.
pub fn decode_products(bytes: &[u8], origin: &str) -> Result<Vec<Product>, DataSourceError> {
    let document: ProductsDocument =
        serde_json::from_slice(bytes).map_err(|source| DataSourceError::Decode {
            origin: origin.to_string(),
            source,
        })?;

    Ok(match document {
        ProductsDocument::Wrapped { products } => products,
        ProductsDocument::Bare(products) => products,
    })
}

/// Build the product source described by the configuration
pub fn source_from_config(config: &SourceConfig) -> Result<Arc<dyn ProductSource>, ConfigError> {
    match config {
        SourceConfig::File { path } => Ok(Arc::new(FileProductSource::new(path.clone()))),
        #[cfg(feature = "remote")]
        SourceConfig::Remote { url, timeout_secs } => {
            let source = RemoteProductSource::new(
                url.clone(),
                std::time::Duration::from_secs(*timeout_secs),
            )
            .map_err(|e| ConfigError::Invalid {
                field: "source.url".to_string(),
                message: e.to_string(),
            })?;
            Ok(Arc::new(source))
        }
        #[cfg(not(feature = "remote"))]
        SourceConfig::Remote { .. } => Err(ConfigError::Invalid {
            field: "source.kind".to_string(),
            message: "remote sources require the 'remote' feature".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wrapped_document() {
        let raw = br#"{"products": [{"id": "1", "title": "A", "price": 1}], "users": []}"#;
        let products = decode_products(raw, "db.json").unwrap();
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_decode_bare_array() {
        let raw = br#"[{"id": "1", "price": 1}, {"id": "2", "price": 2}]"#;
        let products = decode_products(raw, "remote").unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].title, "");
    }

    #[test]
    fn test_decode_rejects_other_shapes() {
        let err = decode_products(br#"{"items": []}"#, "db.json").unwrap_err();
        assert!(matches!(err, DataSourceError::Decode { ref origin, .. } if origin == "db.json"));
    }

    #[test]
    fn test_source_from_file_config() {
        let source = source_from_config(&SourceConfig::File {
            path: "catalog-db.json".into(),
        })
        .unwrap();
        assert_eq!(source.describe(), "file catalog-db.json");
    }
}
