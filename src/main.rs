mod config;
mod db;
mod dedup;
mod error;
mod fetch;
mod fields;
mod geocode;
mod notice;
mod parser;
mod pipeline;
mod text;

use std::time::Instant;

use anyhow::Context;
use tracing::info;

use config::Settings;
use fetch::HttpClient;
use geocode::GoogleGeocoder;
use pipeline::Pipeline;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let settings = Settings::load()?;
    info!(settings = %settings.redacted(), "Starting penalty notice scrape");

    let fetcher = HttpClient::new(settings.http_timeout())?;
    let geocoder = GoogleGeocoder::new(
        settings.geocode_url.clone(),
        settings.google_api_key.clone(),
        settings.http_timeout(),
    )
    .context("Failed to build geocoding client")?;
    let conn = db::connect(&settings.db_path)?;

    let stats = Pipeline::new(fetcher, geocoder, conn, settings.base_url.clone()).run()?;
    stats.print();

    println!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}
