#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use glazier_itinerary::{
    aggregator::RouteMetricsAggregator,
    clock::ManualClock,
    config::AggregatorConfig,
    stop::{Depot, Stop},
};
use glazier_matrix_providers::{
    matrix_error::MatrixError, matrix_source::MatrixSource, travel_matrices::TravelMatrices,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

type Respond = Box<dyn Fn(&[geo_types::Point]) -> Result<TravelMatrices, MatrixError> + Send + Sync>;

/// In-memory matrix provider that records every request it receives.
pub struct FakeMatrixSource {
    calls: AtomicUsize,
    requests: Mutex<Vec<Vec<(f64, f64)>>>,
    gate: Option<Arc<Notify>>,
    respond: Respond,
}

impl FakeMatrixSource {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&[geo_types::Point]) -> Result<TravelMatrices, MatrixError> + Send + Sync + 'static,
    {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            gate: None,
            respond: Box::new(respond),
        }
    }

    /// Distance from `i` to `j` is `i * 100 + j` meters, time a tenth of it.
    pub fn index_matrices() -> Self {
        Self::new(|points| Ok(index_matrices(points.len())))
    }

    pub fn failing(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| {
            Err(MatrixError::Api {
                status,
                body: body.clone(),
            })
        })
    }

    /// Requests wait until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Submitted points as `(lng, lat)`, one entry per request.
    pub fn requests(&self) -> Vec<Vec<(f64, f64)>> {
        self.requests.lock().clone()
    }
}

impl MatrixSource for FakeMatrixSource {
    async fn fetch_matrix<P>(&self, points: &[P]) -> Result<TravelMatrices, MatrixError>
    where
        P: Sync,
        for<'a> &'a P: Into<geo_types::Point>,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let points = points
            .iter()
            .map(|point| -> geo_types::Point { point.into() })
            .collect::<Vec<_>>();
        self.requests
            .lock()
            .push(points.iter().map(|point| (point.x(), point.y())).collect());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        (self.respond)(&points)
    }
}

pub fn index_matrices(num_locations: usize) -> TravelMatrices {
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

/// Matrices where only the cycle legs matter: `legs[i]` is the `(meters, seconds)` from
/// location `i` to `i + 1`, the last one returning to 0.
pub fn cycle_matrices(legs: &[(f64, f64)]) -> TravelMatrices {
    let num_locations = legs.len();
    let mut distances = vec![0.0; num_locations * num_locations];
    let mut times = vec![0.0; num_locations * num_locations];

    for (from, (distance, time)) in legs.iter().enumerate() {
        let to = (from + 1) % num_locations;
        distances[from * num_locations + to] = *distance;
        times[from * num_locations + to] = *time;
    }

    TravelMatrices { distances, times }
}

pub fn depot() -> Depot {
    Depot::new("Unit 4, Canal Wharf, Leeds", 53.7926, -1.5537)
}

pub fn stop(id: &str, lat: f64, lng: f64) -> Stop {
    Stop::new(id, format!("{id} Park Row, Leeds"), lat, lng)
}

pub fn create_stops(count: usize) -> Vec<Stop> {
    (1..=count)
        .map(|i| stop(&format!("job-{i}"), 53.80 + i as f64 * 0.01, -1.55))
        .collect()
}

pub fn start_time() -> jiff::Timestamp {
    "2026-03-02T08:00:00Z".parse().unwrap()
}

pub fn create_aggregator(
    source: FakeMatrixSource,
) -> (
    RouteMetricsAggregator<FakeMatrixSource, Arc<ManualClock>>,
    Arc<ManualClock>,
) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let aggregator = RouteMetricsAggregator::with_clock(
        source,
        AggregatorConfig::new(depot()),
        Arc::clone(&clock),
    );

    (aggregator, clock)
}
