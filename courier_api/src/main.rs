mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::serve;
use courier_optimizer::solver::optimizer::Optimizer;
use mimalloc::MiMalloc;
use tracing::{Level, info};

use crate::{config::ApiConfig, routes::router, state::AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = ApiConfig::from_env()?;
    let network = config.load_network()?;
    info!(
        locations = network.num_locations(),
        products = network.catalog().len(),
        "Network loaded"
    );

    let optimizer = Optimizer::new(Arc::new(network), config.optimizer_params())?;
    let app = router(Arc::new(AppState { optimizer }));

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    info!(address = %config.bind_address, "Listening");
    serve(listener, app).await?;

    Ok(())
}
