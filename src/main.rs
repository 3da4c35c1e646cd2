use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use heritage_explorer::api::AppState;
use heritage_explorer::{ExplorerConfig, HttpPlaceSource, logging, web};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ExplorerConfig::load_from_path(config_path)?;
    logging::init(&config.logging)?;

    match &config.sources.dataset_url {
        Some(url) => info!("Curated dataset: {}", url),
        None => info!("Curated dataset: bundled"),
    }
    info!("Geocoder: {}", config.sources.search_base_url);

    let source = HttpPlaceSource::new(&config.sources)?;
    let state = AppState::new(Arc::new(source), config.discovery.page_size);

    web::run(config.server.port, state).await
}
