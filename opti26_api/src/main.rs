use std::sync::Arc;

use anyhow::Context;
use axum::serve;
use mimalloc::MiMalloc;
use opti26_api::{app, config::ApiConfig, state::AppState};
use tracing::{Level, info};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = ApiConfig::from_env()?;
    std::fs::create_dir_all(&config.results_dir).with_context(|| {
        format!(
            "Failed to create results directory {}",
            config.results_dir.display()
        )
    })?;

    info!(
        routing_url = %config.routing.service_url,
        fallback_policy = %config.routing.fallback_policy,
        optimizer = %config.optimizer.display(),
        "Starting upload server"
    );

    let bind = config.bind.clone();
    let state = Arc::new(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    info!("Listening on {}", bind);

    serve(listener, app(state)).await?;

    Ok(())
}
