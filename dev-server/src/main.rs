//! Development backend for UI work
//!
//! Runs the in-memory stand-in for the listings backend, seeded with sample
//! properties, auctions and vehicles, until interrupted.
//!
//! Reads `IP_ADDRESS`, `PORT` and `ALLOWED_ORIGINS` from the environment or
//! a `.env` file. With nothing set it binds an OS-assigned port on
//! 127.0.0.1 and allows any origin.
//!
//! Usage: cargo run -p dev-server

use anyhow::Result;
use test_helpers::backend::Config;
use test_helpers::mock::DevDataset;
use test_helpers::telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("info".into());
    init_subscriber(subscriber)?;

    info!("🚀 Starting development backend");
    let config = Config::from_env()?;
    let app = test_helpers::start(config)?;
    app.client.health_check().await?;
    info!("✅ Backend running on {}", app.address());

    info!("📊 Setting up development data...");
    let dataset = DevDataset::create(&app).await?;

    info!("🎯 Development backend ready!");
    info!("   API: {}", app.address());
    info!("   UI:  cd ui && BACKEND_URL={} trunk serve", app.address());
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development backend");
    Ok(())
}
