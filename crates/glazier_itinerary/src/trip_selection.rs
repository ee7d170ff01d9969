use std::sync::Arc;

use futures::future::{join, join_all};
use glazier_matrix_providers::matrix_source::MatrixSource;
use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    aggregator::{ItineraryError, ItineraryRequest, RouteMetricsAggregator},
    clock::Clock,
    itinerary::Itinerary,
    schedule::{Block, ScheduleDay, find_blocks},
};

/// A first block leg at least this long means the depot is far from the whole working
/// region, so the multi-day trip is the meaningful unit.
pub const BLOCK_TRIP_THRESHOLD_METERS: u64 = 200_000;

pub type TravelResult = Result<Arc<Itinerary>, Arc<ItineraryError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TripChoice {
    SingleDay,
    Block,
}

pub fn select_trip(block: Option<&Itinerary>, threshold_meters: u64) -> TripChoice {
    match block.and_then(Itinerary::first_leg) {
        Some(leg) if leg.distance_meters >= threshold_meters => TripChoice::Block,
        _ => TripChoice::SingleDay,
    }
}

#[derive(Debug)]
pub struct BlockTravel {
    pub block: Block,
    pub itinerary: TravelResult,
}

#[derive(Debug)]
pub struct DayTravel {
    pub date: Date,
    pub area: Option<String>,
    pub single_day: TravelResult,
    pub block: Option<Arc<BlockTravel>>,
    pub choice: TripChoice,
}

impl DayTravel {
    /// The figures a caller should show for this day.
    pub fn displayed(&self) -> &TravelResult {
        match (&self.choice, &self.block) {
            (TripChoice::Block, Some(block)) => &block.itinerary,
            _ => &self.single_day,
        }
    }

    /// Set when the day belongs to a block whose travel could not be computed. The
    /// displayed figures are then the day's own, which may not be what the block would
    /// have chosen.
    pub fn block_error(&self) -> Option<&ItineraryError> {
        self.block
            .as_ref()
            .and_then(|travel| travel.itinerary.as_ref().err())
            .map(|err| err.as_ref())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub force: bool,
    pub base_address: Option<String>,
}

/// Computes every day's own itinerary and every block's itinerary once, all concurrently.
/// Each day keeps its own result, one failing day does not hide the others.
pub async fn plan_schedule_travel<S, C>(
    aggregator: &RouteMetricsAggregator<S, C>,
    days: &[ScheduleDay],
    options: &PlanOptions,
) -> Vec<DayTravel>
where
    S: MatrixSource,
    C: Clock,
{
    let blocks = find_blocks(days);

    let block_futures = blocks.into_iter().map(|block| async move {
        let request = ItineraryRequest {
            label: block.label(),
            area: Some(block.area().to_string()),
            base_address: options.base_address.clone(),
            stops: block.stops(days),
            force: options.force,
        };
        let ticket = aggregator.generations().begin(request.label.clone());
        let itinerary = aggregator
            .compute_tracked(&ticket, &request)
            .await
            .map_err(Arc::new);

        Arc::new(BlockTravel { block, itinerary })
    });

    let day_futures = days.iter().map(|day| async move {
        let request = ItineraryRequest {
            label: day.date.to_string(),
            area: day.area.clone(),
            base_address: options.base_address.clone(),
            stops: day.stops.clone(),
            force: options.force,
        };
        let ticket = aggregator.generations().begin(request.label.clone());
        aggregator
            .compute_tracked(&ticket, &request)
            .await
            .map_err(Arc::new)
    });

    let (block_travels, single_days) = join(join_all(block_futures), join_all(day_futures)).await;

    days.iter()
        .zip(single_days)
        .map(|(day, single_day)| {
            let block = block_travels
                .iter()
                .find(|travel| travel.block.contains(day.date))
                .cloned();
            let choice = select_trip(
                block
                    .as_ref()
                    .and_then(|travel| travel.itinerary.as_deref().ok()),
                aggregator.block_threshold_meters(),
            );

            DayTravel {
                date: day.date,
                area: day.area.clone(),
                single_day,
                block,
                choice,
            }
        })
        .collect()
}
