use crate::{matrix_error::MatrixError, travel_matrices::TravelMatrices};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub fn haversine_distance<P>(from: P, to: P) -> f64
where
    P: Into<geo_types::Point>,
{
    let from: geo_types::Point = from.into();
    let to: geo_types::Point = to.into();

    let lat1_rad = from.y().to_radians();
    let lon1_rad = from.x().to_radians();
    let lat2_rad = to.y().to_radians();
    let lon2_rad = to.x().to_radians();

    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = lon2_rad - lon1_rad;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

pub fn is_valid_speed_kmh(speed_kmh: f64) -> bool {
    speed_kmh.is_finite() && speed_kmh > 0.0
}

/// Parses a straight-line speed from the command line or the environment.
pub fn parse_speed_kmh(value: &str) -> Result<f64, MatrixError> {
    let speed_kmh = value
        .trim()
        .parse::<f64>()
        .map_err(|_| MatrixError::InvalidSpeed(f64::NAN))?;

    if is_valid_speed_kmh(speed_kmh) {
        Ok(speed_kmh)
    } else {
        Err(MatrixError::InvalidSpeed(speed_kmh))
    }
}

/// Straight-line matrices at a constant speed, used when no routing provider is reachable.
pub fn as_the_crow_flies_matrices<P>(points: &[P], speed_kmh: f64) -> TravelMatrices
where
    for<'a> &'a P: Into<geo_types::Point>,
{
    let num_points = points.len();
    let meters_per_second = speed_kmh / 3.6;
    let mut distances: Vec<f64> = vec![0.0; num_points * num_points];
    let mut times: Vec<f64> = vec![0.0; num_points * num_points];

    for (i, from) in points.iter().enumerate() {
        for (j, to) in points.iter().enumerate() {
            let distance = haversine_distance(from, to);
            distances[i * num_points + j] = distance;
            times[i * num_points + j] = distance / meters_per_second;
        }
    }

    TravelMatrices { distances, times }
}
