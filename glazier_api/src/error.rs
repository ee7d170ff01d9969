use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use glazier_itinerary::aggregator::ItineraryError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// The routing provider failed or answered with something unusable
    BadGateway(String),
    Conflict(String),
    InternalServerError(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl From<ItineraryError> for ApiError {
    fn from(error: ItineraryError) -> Self {
        let message = error.to_string();
        match error {
            ItineraryError::Matrix(err) if err.is_configuration() => {
                ApiError::InternalServerError(message)
            }
            ItineraryError::Matrix(_) => ApiError::BadGateway(message),
            ItineraryError::Superseded { .. } => ApiError::Conflict(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message).into_response(),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message).into_response(),
        }
    }
}
