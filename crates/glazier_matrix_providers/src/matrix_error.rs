use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatrixError {
    /// No credential for the routing provider, the request never left the process.
    #[error("Missing GraphHopper API key (set {0})")]
    MissingApiKey(&'static str),

    #[error("Straight-line speed must be a positive number of km/h, got {0}")]
    InvalidSpeed(f64),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status. `body` is the raw response text.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Malformed matrix response: {0}")]
    MalformedResponse(String),
}

impl MatrixError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MatrixError::MissingApiKey(_) | MatrixError::InvalidSpeed(_)
        )
    }

    pub fn provider_body(&self) -> Option<&str> {
        match self {
            MatrixError::Api { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}
