use glazier_matrix_providers::travel_matrices::TravelMatrices;

use crate::stop::{Depot, Stop};

pub fn depot() -> Depot {
    Depot::new("Unit 4, Canal Wharf, Leeds", 53.7926, -1.5537)
}

/// `job-1` .. `job-n`, spread north of the depot.
pub fn create_stops(count: usize) -> Vec<Stop> {
    (1..=count)
        .map(|i| {
            Stop::new(
                format!("job-{i}"),
                format!("{i} Park Row, Leeds"),
                53.80 + i as f64 * 0.01,
                -1.55,
            )
        })
        .collect()
}

/// Matrices where the distance from `i` to `j` is `i * 100 + j` meters and the time is
/// a tenth of it in seconds.
pub fn create_index_matrices(num_locations: usize) -> TravelMatrices {
    let mut distances = Vec::with_capacity(num_locations * num_locations);
    let mut times = Vec::with_capacity(num_locations * num_locations);

    for from in 0..num_locations {
        for to in 0..num_locations {
            let value = (from * 100 + to) as f64;
            distances.push(value);
            times.push(value / 10.0);
        }
    }

    TravelMatrices { distances, times }
}
