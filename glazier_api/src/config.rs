use std::net::SocketAddr;

use anyhow::Context;
use glazier_itinerary::config::AggregatorConfig;
use glazier_matrix_providers::{
    as_the_crow_flies::parse_speed_kmh, graphhopper_api::GraphHopperProfile,
    travel_matrix_provider::TravelMatrixProvider,
};

pub const LISTEN_ADDR_ENV_VAR: &str = "GLAZIER_LISTEN_ADDR";
pub const ROUTING_PROFILE_ENV_VAR: &str = "GLAZIER_ROUTING_PROFILE";
/// When set, distances are straight lines at this speed and GraphHopper is never called.
pub const CROW_FLIES_KMH_ENV_VAR: &str = "GLAZIER_CROW_FLIES_KMH";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

pub struct ServiceConfig {
    pub listen_addr: SocketAddr,
    pub aggregator: AggregatorConfig,
    pub provider: TravelMatrixProvider,
}

impl ServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let listen_addr = std::env::var(LISTEN_ADDR_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid {LISTEN_ADDR_ENV_VAR}"))?;

        let aggregator = AggregatorConfig::from_env()?;

        let provider = match std::env::var(CROW_FLIES_KMH_ENV_VAR) {
            Ok(speed) => TravelMatrixProvider::AsTheCrowFlies {
                speed_kmh: parse_speed_kmh(&speed)
                    .with_context(|| format!("Invalid {CROW_FLIES_KMH_ENV_VAR}"))?,
            },
            Err(_) => TravelMatrixProvider::GraphHopperApi {
                gh_profile: match std::env::var(ROUTING_PROFILE_ENV_VAR) {
                    Ok(profile) => profile.parse().map_err(anyhow::Error::msg)?,
                    Err(_) => GraphHopperProfile::default(),
                },
            },
        };

        Ok(Self {
            listen_addr,
            aggregator,
            provider,
        })
    }
}
