use std::sync::Arc;

use axum::{Json, extract::State};
use glazier_itinerary::{aggregator::ItineraryRequest, itinerary::Itinerary};

use crate::{error::ApiError, state::AppState};

/// Travel for one day or block. A newer request for the same label makes this one answer 409.
pub async fn itinerary_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ItineraryRequest>,
) -> Result<Json<Arc<Itinerary>>, ApiError> {
    let label = body.label.trim();
    if label.is_empty() {
        return Err(ApiError::BadRequest("label is required".to_string()));
    }

    let ticket = state.aggregator.generations().begin(label.to_string());
    let itinerary = state.aggregator.compute_tracked(&ticket, &body).await?;

    Ok(Json(itinerary))
}
