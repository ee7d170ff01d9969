use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// WGS84 coordinates of a stop or of the depot.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<&Coordinates> for geo_types::Point {
    fn from(value: &Coordinates) -> Self {
        geo_types::Point::new(value.lng, value.lat)
    }
}

/// One job location to visit on a given day.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Stop {
    /// Same identifier as the job
    pub id: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Stop {
    pub fn new(id: impl Into<String>, address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            lat: Some(lat),
            lng: Some(lng),
        }
    }

    /// A stop whose coordinates are not known yet.
    pub fn unresolved(id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            lat: None,
            lng: None,
        }
    }

    /// Coordinates usable for a matrix request, `None` when either value is missing or not finite.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Coordinates::new(lat, lng))
            }
            _ => None,
        }
    }
}

/// The fixed start and end point of every trip.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Depot {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl Depot {
    pub fn new(address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            address: address.into(),
            lat,
            lng,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Only the address text can be overridden, the coordinates stay fixed.
    pub fn with_address_override(&self, address: Option<&str>) -> Depot {
        match address.map(str::trim).filter(|address| !address.is_empty()) {
            Some(address) => Depot {
                address: address.to_string(),
                ..self.clone()
            },
            None => self.clone(),
        }
    }
}
