mod app;
mod view;

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    sync::Arc,
};

use tracing_subscriber::{prelude::*, EnvFilter};
use wvw_core::{
    config::{self, AppConfig},
    Gw2Client,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    tracing::info!(base_url = %config.api_base_url, match_id = %config.default_match_id, "starting");

    let client = Gw2Client::new(&config)?;
    let mut app = app::WvwApp::new(Arc::new(client), config.default_match_id.clone());
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("wvwtui.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal is in raw alternate-screen mode, so logs go to the file only.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
