//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_catalog_routes, build_health_routes};
use crate::config::CatalogConfig;
use crate::core::{MetadataExtractor, ProductSource, QueryPipeline, Schema};
use crate::storage::source_from_config;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for creating the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_source(FileProductSource::new("db.json"))
///     .with_schema(Schema::Legacy)
///     .build()?;
/// ```
pub struct ServerBuilder {
    source: Option<Arc<dyn ProductSource>>,
    schema: Schema,
    cors: bool,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            source: None,
            schema: Schema::default(),
            cors: true,
            custom_routes: Vec::new(),
        }
    }

    /// Create a builder from configuration, including its product source
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let source = source_from_config(&config.source)?;

        Ok(Self::new()
            .with_shared_source(source)
            .with_schema(config.schema)
            .with_cors(config.server.cors))
    }

    /// Set the product source (required)
    pub fn with_source(mut self, source: impl ProductSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Set an already shared product source
    pub fn with_shared_source(mut self, source: Arc<dyn ProductSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Select the catalog schema variant
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Enable or disable the permissive CORS layer
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    /// Add custom routes to the server
    ///
    /// # Example
    ///
    /// ```ignore
    /// let admin = Router::new().route("/version", get(version_handler));
    ///
    /// ServerBuilder::new()
    ///     .with_source(source)
    ///     .with_custom_routes(admin)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final REST router
    ///
    /// This generates:
    /// - Catalog routes (products, categories-themes)
    /// - Health check routes
    /// - Custom routes
    ///
    /// wrapped in request tracing and, when enabled, CORS.
    pub fn build(self) -> Result<Router> {
        let source = self
            .source
            .ok_or_else(|| anyhow::anyhow!("ProductSource is required. Call .with_source()"))?;

        tracing::info!(
            source = %source.describe(),
            schema = %self.schema,
            "building catalog router"
        );

        let state = AppState {
            source,
            pipeline: QueryPipeline::new(self.schema),
            extractor: MetadataExtractor::new(self.schema),
        };

        let mut app = build_health_routes().merge(build_catalog_routes(state));

        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        if self.cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::from_config(&config)?
    ///     .serve("127.0.0.1:5005").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server is running on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
