//! Typed error handling for the catalog service
//!
//! The query pipeline and metadata extraction never fail. Errors come from
//! the collaborators around them: obtaining the product collection and
//! loading configuration.
//!
//! # Error Categories
//!
//! - [`DataSourceError`]: the product collection could not be obtained
//! - [`ConfigError`]: configuration could not be read or is invalid
//!
//! Malformed query parameters are not errors; see
//! [`MalformedParameter`](crate::core::query::MalformedParameter).
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! async fn list(source: &dyn ProductSource) -> Result<ProductPage, CatalogError> {
//!     let products = source.load().await?;
//!     Ok(QueryPipeline::default().execute(&products, &ProductQuery::default()))
//! }
//!
//! match list(&source).await {
//!     Ok(page) => println!("{} matches", page.total),
//!     Err(CatalogError::DataSource(e)) => eprintln!("source down: {}", e),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The main error type for the catalog service
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The product collection could not be obtained
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::DataSource(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::DataSource(e) => e.error_code(),
            CatalogError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Message safe to return to clients
    ///
    /// Data-source failures hide paths and upstream URLs; the full error is
    /// only logged.
    pub fn public_message(&self) -> String {
        match self {
            CatalogError::DataSource(_) => "Error reading database".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CatalogError::DataSource(e) => Some(serde_json::json!({ "kind": e.kind() })),
            CatalogError::Config(ConfigError::Invalid { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, code = self.error_code(), "request failed");
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Data Source Errors
// =============================================================================

/// The product collection could not be obtained
///
/// Every variant is reported to clients as `DATA_SOURCE_UNAVAILABLE`; the
/// variant only refines what went wrong for logs.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    /// Local database file could not be read
    #[error("failed to read product database '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Payload was not a product collection
    #[error("failed to decode product collection from '{origin}': {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Remote request failed before a response arrived
    #[error("failed to fetch products from '{url}': {message}")]
    Fetch { url: String, message: String },

    /// Remote endpoint answered with a non-success status
    #[error("product source '{url}' responded with status {status}")]
    Status { url: String, status: u16 },
}

impl DataSourceError {
    pub fn error_code(&self) -> &'static str {
        "DATA_SOURCE_UNAVAILABLE"
    }

    /// Short variant name for logs and error details
    pub fn kind(&self) -> &'static str {
        match self {
            DataSourceError::Io { .. } => "io",
            DataSourceError::Decode { .. } => "decode",
            DataSourceError::Fetch { .. } => "fetch",
            DataSourceError::Status { .. } => "status",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("failed to parse config{}: {message}", in_file(.file))]
    Parse {
        file: Option<String>,
        message: String,
    },

    /// A value is out of range or inconsistent
    #[error("invalid configuration for '{field}': {message}")]
    Invalid { field: String, message: String },
}

fn in_file(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}
