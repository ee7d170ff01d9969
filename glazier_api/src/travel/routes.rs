use std::sync::Arc;

use axum::{Router, routing::post};

use crate::{
    state::AppState,
    travel::{itinerary::itinerary_handler, schedule::schedule_travel_handler},
};

pub fn travel_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/itinerary", post(itinerary_handler))
        .route("/schedule/travel", post(schedule_travel_handler))
        .with_state(state)
}
