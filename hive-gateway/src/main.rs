//! Hive Gateway Binary
//!
//! Signal intake for the Hive Nervous System.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hive_billing::StripeUsageRecorder;
use hive_gateway::{config::GatewayConfig, routes, state::AppState};
use hive_window::RedisWindowStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Hive Nervous System gateway v{}", hive_common::VERSION);

    // Load configuration; REDIS_URL and STRIPE_API_KEY are required
    let config = GatewayConfig::load()?;

    // Connect collaborators once; a dead window store aborts startup
    let window = RedisWindowStore::new(&config.redis_url).await?;
    info!("Connected to window store");

    let billing = StripeUsageRecorder::new(config.stripe_api_key.clone());

    let state = AppState::new(Arc::new(window), Arc::new(billing));
    let app = routes::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Gateway listening on {}", addr);

    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutting down gateway");
    Ok(())
}
