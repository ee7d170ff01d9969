use std::sync::Arc;

use axum::{Router, routing::get};

use crate::{health::health_handler, state::AppState, travel::routes::travel_routes};

pub fn app_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(Arc::clone(&state))
        .merge(travel_routes(state))
}
