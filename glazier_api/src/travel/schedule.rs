use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use glazier_itinerary::{
    json::types::{JsonDayTravel, JsonScheduleInput},
    trip_selection::{PlanOptions, plan_schedule_travel},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize, Default)]
pub struct RefreshQuery {
    /// Bypass cached itineraries, fresh results are cached again
    #[serde(default)]
    pub force: bool,
}

#[derive(Serialize)]
pub struct ScheduleTravelResponse {
    days: Vec<JsonDayTravel>,
}

pub async fn schedule_travel_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RefreshQuery>,
    Json(body): Json<JsonScheduleInput>,
) -> Result<Json<ScheduleTravelResponse>, ApiError> {
    let days = body
        .schedule_days()
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let options = PlanOptions {
        force: query.force,
        base_address: body.base_address.clone(),
    };

    let travel = plan_schedule_travel(&state.aggregator, &days, &options).await;

    let failed = travel.iter().filter(|day| day.displayed().is_err()).count();
    if failed > 0 {
        info!("Travel unavailable for {} of {} days", failed, travel.len());
    }

    Ok(Json(ScheduleTravelResponse {
        days: travel.iter().map(JsonDayTravel::from).collect(),
    }))
}
