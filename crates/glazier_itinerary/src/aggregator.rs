use std::sync::Arc;

use glazier_matrix_providers::{matrix_error::MatrixError, matrix_source::MatrixSource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    cache::ItineraryCache,
    cache_key::ItineraryCacheKey,
    clock::{Clock, SystemClock},
    config::AggregatorConfig,
    generations::{GenerationTicket, RequestGenerations},
    itinerary::Itinerary,
    schedule::normalize_area,
    stop::{Coordinates, Depot, Stop},
};

#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// A newer computation for the same day or block started while this one was in flight.
    #[error("Travel for {key} was superseded by a newer request")]
    Superseded { key: String },
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ItineraryRequest {
    /// ISO date, or `start_end` for a block
    pub label: String,
    pub area: Option<String>,
    /// Replaces the depot address text, never its coordinates
    pub base_address: Option<String>,
    pub stops: Vec<Stop>,
    /// Skip the cache lookup. A successful result is still cached.
    #[serde(default)]
    pub force: bool,
}

/// Turns a day's (or a block's) stops into legs and totals, one matrix request per
/// cache miss.
pub struct RouteMetricsAggregator<S, C = SystemClock> {
    source: S,
    depot: Depot,
    cache: ItineraryCache<C>,
    generations: RequestGenerations,
    block_threshold_meters: u64,
}

impl<S: MatrixSource> RouteMetricsAggregator<S, SystemClock> {
    pub fn new(source: S, config: AggregatorConfig) -> Self {
        Self::with_clock(source, config, SystemClock)
    }
}

impl<S: MatrixSource, C: Clock> RouteMetricsAggregator<S, C> {
    pub fn with_clock(source: S, config: AggregatorConfig, clock: C) -> Self {
        Self {
            source,
            depot: config.depot,
            cache: ItineraryCache::new(clock, config.cache_ttl),
            generations: RequestGenerations::default(),
            block_threshold_meters: config.block_threshold_meters,
        }
    }

    pub fn depot(&self) -> &Depot {
        &self.depot
    }

    pub fn cache(&self) -> &ItineraryCache<C> {
        &self.cache
    }

    pub fn generations(&self) -> &RequestGenerations {
        &self.generations
    }

    pub fn block_threshold_meters(&self) -> u64 {
        self.block_threshold_meters
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    #[instrument(skip_all, level = "debug", fields(label = %request.label))]
    pub async fn compute_itinerary(
        &self,
        request: &ItineraryRequest,
    ) -> Result<Arc<Itinerary>, ItineraryError> {
        self.compute(request, None).await
    }

    /// Like [`Self::compute_itinerary`], but a result that arrives after `ticket` went stale
    /// is dropped without touching the cache.
    #[instrument(skip_all, level = "debug", fields(label = %request.label))]
    pub async fn compute_tracked(
        &self,
        ticket: &GenerationTicket,
        request: &ItineraryRequest,
    ) -> Result<Arc<Itinerary>, ItineraryError> {
        self.compute(request, Some(ticket)).await
    }

    async fn compute(
        &self,
        request: &ItineraryRequest,
        ticket: Option<&GenerationTicket>,
    ) -> Result<Arc<Itinerary>, ItineraryError> {
        let base = self
            .depot
            .with_address_override(request.base_address.as_deref());
        let area = request.area.as_deref().and_then(normalize_area);

        let mut resolved: Vec<Stop> = Vec::with_capacity(request.stops.len());
        let mut points: Vec<Coordinates> = Vec::with_capacity(request.stops.len() + 1);
        let mut unresolved_stop_ids = Vec::new();
        points.push(base.coordinates());

        for stop in &request.stops {
            match stop.coordinates() {
                Some(coordinates) => {
                    points.push(coordinates);
                    resolved.push(stop.clone());
                }
                None => unresolved_stop_ids.push(stop.id.clone()),
            }
        }

        if resolved.is_empty() {
            return Ok(Arc::new(Itinerary::empty(
                request.label.clone(),
                area,
                base,
                unresolved_stop_ids,
            )));
        }

        let key = ItineraryCacheKey::new(&request.label, area.as_deref(), &base, &request.stops);

        if !request.force {
            if let Some(itinerary) = self.cache.get(&key) {
                debug!("Itinerary cache hit for {}", request.label);
                return Ok(itinerary);
            }
        }

        debug!(
            "Itinerary cache miss for {}, requesting matrix for {} locations",
            request.label,
            points.len()
        );

        let matrices = self
            .source
            .fetch_matrix(&points)
            .await
            .inspect_err(|err| warn!("Matrix request for {} failed: {}", request.label, err))?;

        if let Some(ticket) = ticket {
            if !self.generations.is_current(ticket) {
                debug!("Dropping stale itinerary for {}", ticket.key());
                return Err(ItineraryError::Superseded {
                    key: ticket.key().to_string(),
                });
            }
        }

        let itinerary = Arc::new(Itinerary::from_matrices(
            request.label.clone(),
            area,
            base,
            resolved,
            unresolved_stop_ids,
            &matrices,
        )?);

        let expires_at = self.cache.insert(key, Arc::clone(&itinerary));
        debug!(
            "Cached itinerary for {} until {} ({} m, {} s)",
            request.label,
            expires_at,
            itinerary.total_distance_meters,
            itinerary.total_duration_seconds
        );

        Ok(itinerary)
    }
}
