mod config;
mod error;
mod health;
mod routes;
mod state;
mod travel;

use std::sync::Arc;

use axum::http::Method;
use axum::serve;
use glazier_matrix_providers::{
    travel_matrix_client::TravelMatrixClient, travel_matrix_provider::TravelMatrixProvider,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info, warn};

use mimalloc::MiMalloc;

use crate::{config::ServiceConfig, routes::app_routes, state::AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = ServiceConfig::from_env()?;

    if matches!(config.provider, TravelMatrixProvider::GraphHopperApi { .. })
        && std::env::var(glazier_matrix_providers::graphhopper_api::GRAPHHOPPER_API_KEY_ENV_VAR)
            .is_err()
    {
        warn!("GRAPHHOPPER_API_KEY is not set, travel requests will fail until it is");
    }

    info!(
        "Depot at {} ({}, {}), cache TTL {}",
        config.aggregator.depot.address,
        config.aggregator.depot.lat,
        config.aggregator.depot.lng,
        config.aggregator.cache_ttl
    );

    let state = Arc::new(AppState::new(
        TravelMatrixClient::default(),
        config.provider.clone(),
        config.aggregator.clone(),
    ));

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    let app = app_routes(state).layer(ServiceBuilder::new().layer(cors_layer));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Listening on {}", config.listen_addr);

    serve(listener, app).await?;

    Ok(())
}
