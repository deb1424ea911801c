use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quakemap::feed::FeedClient;
use quakemap::server::{start_server, state::AppState};
use quakemap::settings::Settings;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quakemap=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    info!("QuakeMap v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load().context("Failed to load settings")?;
    info!(
        earthquakes = %settings.earthquakes_url,
        plates = %settings.plates_url,
        "feed sources"
    );

    let client = FeedClient::new(&settings).context("Failed to build HTTP client")?;
    let state = AppState {
        settings: Arc::new(settings),
        client,
    };

    start_server(state).await
}
