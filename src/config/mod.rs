//! Configuration loading and management

use crate::core::{ConfigError, Schema};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// TCP port
    pub port: u16,

    /// Permissive CORS (any origin, method and header)
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5005,
            cors: true,
        }
    }
}

/// Where the product collection comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Local `{"products": [...]}` JSON file
    File {
        #[serde(default = "default_db_path")]
        path: PathBuf,
    },

    /// Remote endpoint returning the collection as JSON
    Remote {
        url: String,

        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::File {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("db.json")
}

fn default_timeout_secs() -> u64 {
    10
}

/// Complete configuration for the catalog service
///
/// # Example
/// ```yaml
/// server:
///   host: 0.0.0.0
///   port: 8080
/// source:
///   kind: remote
///   url: https://example.com/products.json
/// schema: legacy
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub schema: Schema,
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            file: None,
            message: e.to_string(),
        })
    }

    /// Apply overrides from the process environment
    ///
    /// See [`CatalogConfig::apply_overrides`] for the recognised variables.
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    ///
    /// - `CATALOG_HOST`
    /// - `CATALOG_PORT`, falling back to `PORT`
    /// - `CATALOG_DB_PATH` switches to a file source
    /// - `CATALOG_REMOTE_URL` switches to a remote source (wins over `CATALOG_DB_PATH`)
    /// - `CATALOG_SCHEMA` (`legacy` or `tiered`)
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("CATALOG_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("CATALOG_PORT").or_else(|| lookup("PORT")) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                field: "server.port".to_string(),
                message: format!("'{}' is not a valid port", port),
            })?;
        }

        if let Some(path) = lookup("CATALOG_DB_PATH") {
            self.source = SourceConfig::File { path: path.into() };
        }

        if let Some(url) = lookup("CATALOG_REMOTE_URL") {
            let timeout_secs = match &self.source {
                SourceConfig::Remote { timeout_secs, .. } => *timeout_secs,
                SourceConfig::File { .. } => default_timeout_secs(),
            };
            self.source = SourceConfig::Remote { url, timeout_secs };
        }

        if let Some(schema) = lookup("CATALOG_SCHEMA") {
            self.schema = schema.parse().map_err(|message| ConfigError::Invalid {
                field: "schema".to_string(),
                message,
            })?;
        }

        Ok(self)
    }

    /// Reject values that would only fail later at request time
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.source {
            SourceConfig::File { path } if path.as_os_str().is_empty() => {
                return Err(ConfigError::Invalid {
                    field: "source.path".to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
            SourceConfig::Remote { url, .. } if url.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    field: "source.url".to_string(),
                    message: "url must not be empty".to_string(),
                });
            }
            SourceConfig::Remote { timeout_secs: 0, .. } => {
                return Err(ConfigError::Invalid {
                    field: "source.timeout_secs".to_string(),
                    message: "timeout must be at least one second".to_string(),
                });
            }
            _ => {}
        }
        Ok(())
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
