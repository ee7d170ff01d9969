use glazier_matrix_providers::{matrix_error::MatrixError, travel_matrices::TravelMatrices};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::stop::{Depot, Stop};

/// Identifier used for the depot in leg endpoints.
pub const BASE_ID: &str = "base";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Leg {
    pub from_id: String,
    pub to_id: String,
    pub distance_meters: u64,
    pub duration_seconds: u64,
}

/// Ordered travel for one day or one block: base, every stop in schedule order, back to base.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Itinerary {
    pub label: String,
    pub area: Option<String>,
    pub base: Depot,
    pub stops: Vec<Stop>,
    pub legs: Vec<Leg>,
    pub total_distance_meters: u64,
    pub total_duration_seconds: u64,
    /// Input stops left out of the matrix request because they have no usable coordinates.
    pub unresolved_stop_ids: Vec<String>,
}

/// Provider values are floating point, legs carry whole meters and seconds.
pub fn round_metric(value: f64) -> u64 {
    // `as` saturates, NaN becomes 0
    value.max(0.0).round() as u64
}

fn location_id(stops: &[Stop], index: usize) -> &str {
    if index == 0 {
        BASE_ID
    } else {
        &stops[index - 1].id
    }
}

impl Itinerary {
    pub fn empty(
        label: String,
        area: Option<String>,
        base: Depot,
        unresolved_stop_ids: Vec<String>,
    ) -> Self {
        Self {
            label,
            area,
            base,
            stops: Vec::new(),
            legs: Vec::new(),
            total_distance_meters: 0,
            total_duration_seconds: 0,
            unresolved_stop_ids,
        }
    }

    /// Reads the cycle base -> stop 1 -> ... -> stop N -> base out of matrices indexed
    /// with the base at 0 and the stops at 1..=N in the same order.
    pub fn from_matrices(
        label: String,
        area: Option<String>,
        base: Depot,
        stops: Vec<Stop>,
        unresolved_stop_ids: Vec<String>,
        matrices: &TravelMatrices,
    ) -> Result<Self, MatrixError> {
        let num_locations = stops.len() + 1;
        matrices.ensure_dimension(num_locations)?;

        let legs = (0..num_locations)
            .map(|from| {
                let to = (from + 1) % num_locations;
                Leg {
                    from_id: location_id(&stops, from).to_string(),
                    to_id: location_id(&stops, to).to_string(),
                    distance_meters: round_metric(matrices.distance(from, to)),
                    duration_seconds: round_metric(matrices.time(from, to)),
                }
            })
            .collect::<Vec<_>>();

        let total_distance_meters = legs
            .iter()
            .map(|leg| leg.distance_meters)
            .fold(0, u64::saturating_add);
        let total_duration_seconds = legs
            .iter()
            .map(|leg| leg.duration_seconds)
            .fold(0, u64::saturating_add);

        Ok(Self {
            label,
            area,
            base,
            stops,
            legs,
            total_distance_meters,
            total_duration_seconds,
            unresolved_stop_ids,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Base to the first stop.
    pub fn first_leg(&self) -> Option<&Leg> {
        self.legs.first()
    }

    /// The leg departing from the given stop, the last stop's leg returns to base.
    pub fn leg_from(&self, stop_id: &str) -> Option<&Leg> {
        self.legs.iter().find(|leg| leg.from_id == stop_id)
    }
}
