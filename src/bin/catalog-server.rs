//! Catalog server.
//!
//! Run with: cargo run --bin catalog-server [BIND_ADDR]
//!
//! Environment:
//!   CATALOG_BIND_ADDR   bind address (default 0.0.0.0:3000)
//!   CATALOG_SEED        preload sample data, true/false (default true)
//!   RUST_LOG            log filter (default info)

use std::net::SocketAddr;
use std::sync::Arc;

use media_catalog::service;
use media_catalog::{Catalog, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = ServerConfig::from_env()?;
    if let Some(addr) = std::env::args().nth(1) {
        config = config.bind(addr.parse::<SocketAddr>()?);
    }

    let catalog = if config.seed_sample_data {
        Catalog::with_sample_data()
    } else {
        Catalog::new()
    };
    info!(
        items = catalog.items().len(),
        subscribers = catalog.subscribers().len(),
        "catalog loaded"
    );

    let service = Arc::new(service::catalog_service(catalog));
    service::serve(service, config.bind_addr).await?;

    info!("server stopped");
    Ok(())
}
