// Main entry point - Dependency injection and command dispatch
use std::sync::Arc;

use asset_dashboard::application::asset_api::AssetApi;
use asset_dashboard::application::dashboard_service::DashboardService;
use asset_dashboard::infrastructure::config::load_dashboard_config;
use asset_dashboard::infrastructure::http_api::HttpAssetApi;
use asset_dashboard::infrastructure::static_api::StaticAssetApi;
use asset_dashboard::presentation::cli::{run, Cli};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; logs go to stderr so rendered views stay clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = load_dashboard_config(cli.config.as_deref())?;

    // Create the asset API (infrastructure layer)
    let api: Arc<dyn AssetApi> = match &cli.fixture {
        Some(path) => {
            tracing::info!("Serving assets from fixture {}", path);
            Arc::new(StaticAssetApi::load(path)?)
        }
        None => {
            tracing::info!("Using asset API at {}", config.api.base_url);
            Arc::new(HttpAssetApi::new(&config.api)?)
        }
    };

    // Create service (application layer)
    let service = DashboardService::new(api);

    let output = run(cli.command, &service, &config).await?;
    print!("{}", output);

    Ok(())
}
