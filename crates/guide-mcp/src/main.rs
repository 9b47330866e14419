mod api;
mod config;
mod error;
mod loader;
mod server;

use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use loader::CatalogueLoader;
use server::GuideServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting guide-mcp server");

    // 1. Load config from environment
    let config = Config::from_env()?;
    info!(catalogue_path = %config.catalogue_path, "configuration loaded");

    // 2. Load the catalogue eagerly, before serving anything
    let loader = CatalogueLoader::new(config);
    let (catalogue, fingerprint) = loader.load()?;
    info!(
        methods = catalogue.methods().len(),
        %fingerprint,
        "catalogue ready"
    );

    // 3. Build MCP server and serve on stdio
    let server = GuideServer::new(catalogue, fingerprint, loader);

    info!("MCP server ready, serving on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!(error = %e, "MCP server error");
    })?;

    service.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}
