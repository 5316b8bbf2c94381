use axum::Router;
use clap::Parser;
use std::sync::Arc;
use vehicles_api::config::file::FileConfig;
use vehicles_api::domain::ports::Locator;
use vehicles_api::utils::{logger, validation::Validate};
use vehicles_api::{
    api, CliConfig, Enricher, InMemoryVehicleStore, RegistryLocator, StaticLocator,
    VehicleService, MAPS_SERVICE, PRICING_SERVICE,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting vehicles-api");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Some(path) = config.config.clone() {
        let file = FileConfig::from_file(&path)?;
        config.merge_file(file);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()?;

    let router = if let Some(registry_url) = config.registry_url.clone() {
        tracing::info!("🔭 Resolving services through registry at {}", registry_url);
        let locator = RegistryLocator::new(
            registry_url,
            client.clone(),
            config.registry_poll_interval(),
        );
        // Prime the endpoint table once before serving; the poller keeps it
        // fresh from here on.
        locator.refresh().await;
        locator.spawn_poller();
        build_router(client, locator)
    } else {
        // validate() has already established both URLs are present and parse.
        let mut locator = StaticLocator::new();
        locator.insert_url(PRICING_SERVICE, config.pricing_url.as_deref().unwrap_or_default())?;
        locator.insert_url(MAPS_SERVICE, config.maps_url.as_deref().unwrap_or_default())?;
        tracing::info!("📌 Using static service addresses, registry bypassed");
        build_router(client, Arc::new(locator))
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("🚗 vehicles-api listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}

fn build_router<L: Locator + 'static>(client: reqwest::Client, locator: Arc<L>) -> Router {
    let enricher = Enricher::new(client, locator);
    let service = Arc::new(VehicleService::new(InMemoryVehicleStore::new(), enricher));
    api::router(service)
}
