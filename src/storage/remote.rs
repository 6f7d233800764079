//! Remote JSON endpoint

use super::decode_products;
use crate::core::{DataSourceError, Product, ProductSource};
use async_trait::async_trait;
use std::time::Duration;

/// Fetches the product collection over HTTP on every load
///
/// The endpoint may answer with a `{"products": [...]}` document or a bare
/// JSON array.
#[derive(Debug, Clone)]
pub struct RemoteProductSource {
    client: reqwest::Client,
    url: String,
}

impl RemoteProductSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DataSourceError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataSourceError::Fetch {
                url: url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProductSource for RemoteProductSource {
    async fn load(&self) -> Result<Vec<Product>, DataSourceError> {
        let fetch_error = |e: reqwest::Error| DataSourceError::Fetch {
            url: self.url.clone(),
            message: e.to_string(),
        };

        let response = self.client.get(&self.url).send().await.map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataSourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(fetch_error)?;
        let products = decode_products(&bytes, &self.url)?;
        tracing::debug!(url = %self.url, count = products.len(), "fetched product collection");
        Ok(products)
    }

    fn describe(&self) -> String {
        format!("remote {}", self.url)
    }
}
