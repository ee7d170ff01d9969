use jiff::SignedDuration;
use thiserror::Error;

use crate::{cache::DEFAULT_CACHE_TTL, stop::Depot, trip_selection::BLOCK_TRIP_THRESHOLD_METERS};

pub const DEPOT_ADDRESS_ENV_VAR: &str = "GLAZIER_DEPOT_ADDRESS";
pub const DEPOT_LAT_ENV_VAR: &str = "GLAZIER_DEPOT_LAT";
pub const DEPOT_LNG_ENV_VAR: &str = "GLAZIER_DEPOT_LNG";
pub const CACHE_TTL_SECS_ENV_VAR: &str = "GLAZIER_CACHE_TTL_SECS";
pub const BLOCK_THRESHOLD_METERS_ENV_VAR: &str = "GLAZIER_BLOCK_THRESHOLD_METERS";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatorConfig {
    pub depot: Depot,
    pub cache_ttl: SignedDuration,
    pub block_threshold_meters: u64,
}

impl AggregatorConfig {
    pub fn new(depot: Depot) -> Self {
        Self {
            depot,
            cache_ttl: DEFAULT_CACHE_TTL,
            block_threshold_meters: BLOCK_TRIP_THRESHOLD_METERS,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let address = lookup(DEPOT_ADDRESS_ENV_VAR).unwrap_or_default();
        let lat = parse_required::<f64, _>(&lookup, DEPOT_LAT_ENV_VAR)?;
        let lng = parse_required::<f64, _>(&lookup, DEPOT_LNG_ENV_VAR)?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(ConfigError::Invalid {
                name: DEPOT_LAT_ENV_VAR,
                value: lat.to_string(),
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ConfigError::Invalid {
                name: DEPOT_LNG_ENV_VAR,
                value: lng.to_string(),
            });
        }

        let mut config = Self::new(Depot::new(address, lat, lng));

        if let Some(secs) = parse_optional::<i64, _>(&lookup, CACHE_TTL_SECS_ENV_VAR)? {
            config.cache_ttl = SignedDuration::from_secs(secs);
        }
        if let Some(meters) = parse_optional::<u64, _>(&lookup, BLOCK_THRESHOLD_METERS_ENV_VAR)? {
            config.block_threshold_meters = meters;
        }

        Ok(config)
    }
}

fn parse_optional<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(None),
    }
}

fn parse_required<T, F>(lookup: &F, name: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    parse_optional(lookup, name)?.ok_or(ConfigError::Missing(name))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<&'static str, String> = vars
            .iter()
            .map(|(name, value)| (*name, value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AggregatorConfig::from_lookup(lookup(&[
            (DEPOT_ADDRESS_ENV_VAR, "Unit 4, Canal Wharf"),
            (DEPOT_LAT_ENV_VAR, "53.7926"),
            (DEPOT_LNG_ENV_VAR, "-1.5537"),
        ]))
        .unwrap();

        assert_eq!(config.depot.address, "Unit 4, Canal Wharf");
        assert_eq!(config.cache_ttl, SignedDuration::from_mins(10));
        assert_eq!(config.block_threshold_meters, 200_000);
    }

    #[test]
    fn test_overrides() {
        let config = AggregatorConfig::from_lookup(lookup(&[
            (DEPOT_LAT_ENV_VAR, "53.7926"),
            (DEPOT_LNG_ENV_VAR, "-1.5537"),
            (CACHE_TTL_SECS_ENV_VAR, "120"),
            (BLOCK_THRESHOLD_METERS_ENV_VAR, "150000"),
        ]))
        .unwrap();

        assert_eq!(config.cache_ttl, SignedDuration::from_secs(120));
        assert_eq!(config.block_threshold_meters, 150_000);
    }

    #[test]
    fn test_missing_depot_coordinates() {
        let result = AggregatorConfig::from_lookup(lookup(&[(DEPOT_LAT_ENV_VAR, "53.7926")]));

        assert_eq!(result, Err(ConfigError::Missing(DEPOT_LNG_ENV_VAR)));
    }

    #[test]
    fn test_invalid_values() {
        let result = AggregatorConfig::from_lookup(lookup(&[
            (DEPOT_LAT_ENV_VAR, "north"),
            (DEPOT_LNG_ENV_VAR, "-1.5537"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { name, .. }) if name == DEPOT_LAT_ENV_VAR));

        let result = AggregatorConfig::from_lookup(lookup(&[
            (DEPOT_LAT_ENV_VAR, "153.0"),
            (DEPOT_LNG_ENV_VAR, "-1.5537"),
        ]));
        assert!(result.is_err());
    }
}
