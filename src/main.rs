//! `catalog-server`: serve a product catalog over HTTP

use anyhow::Result;
use catalog::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "catalog-server", version, about = "Read-only product catalog query service")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "CATALOG_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind, overrides the configuration
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("catalog=info,catalog_server=info,tower_http=info")
            }),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CatalogConfig::from_yaml_file(path)?,
        None => CatalogConfig::default(),
    };
    let mut config = config.apply_env_overrides()?;

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!(
        bind = %config.bind_addr(),
        schema = %config.schema,
        "starting catalog server"
    );

    ServerBuilder::from_config(&config)?
        .serve(&config.bind_addr())
        .await
}
