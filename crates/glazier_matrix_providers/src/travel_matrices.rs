use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::matrix_error::MatrixError;

/// TravelMatrices holds the travel distance and time matrices.
/// Stored as flat vectors, the value for a pair of locations lives at
/// `from * num_locations + to`.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Default, PartialEq)]
pub struct TravelMatrices {
    /// Distances in meters
    pub distances: Vec<f64>,

    /// Travel times in seconds
    pub times: Vec<f64>,
}

impl TravelMatrices {
    /// Builds flat matrices from square row matrices, rejecting anything that is not
    /// `num_locations` x `num_locations`.
    pub fn from_rows(
        distances: Vec<Vec<f64>>,
        times: Vec<Vec<f64>>,
        num_locations: usize,
    ) -> Result<Self, MatrixError> {
        ensure_square("distances", &distances, num_locations)?;
        ensure_square("times", &times, num_locations)?;

        Ok(Self {
            distances: distances.into_iter().flatten().collect(),
            times: times.into_iter().flatten().collect(),
        })
    }

    pub fn num_locations(&self) -> usize {
        self.distances.len().isqrt()
    }

    pub fn ensure_dimension(&self, num_locations: usize) -> Result<(), MatrixError> {
        let expected = num_locations * num_locations;
        if self.distances.len() != expected || self.times.len() != expected {
            return Err(MatrixError::MalformedResponse(format!(
                "expected {expected} entries per matrix, got {} distances and {} times",
                self.distances.len(),
                self.times.len()
            )));
        }

        Ok(())
    }

    #[inline(always)]
    fn index(&self, from: usize, to: usize) -> usize {
        from * self.num_locations() + to
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[self.index(from, to)]
    }

    pub fn time(&self, from: usize, to: usize) -> f64 {
        self.times[self.index(from, to)]
    }
}

impl std::hash::Hash for TravelMatrices {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for d in &self.distances {
            state.write_u64(d.to_bits());
        }
        for t in &self.times {
            state.write_u64(t.to_bits());
        }
    }
}

fn ensure_square(name: &str, rows: &[Vec<f64>], num_locations: usize) -> Result<(), MatrixError> {
    if rows.len() != num_locations || rows.iter().any(|row| row.len() != num_locations) {
        return Err(MatrixError::MalformedResponse(format!(
            "{name} matrix is not {num_locations}x{num_locations}"
        )));
    }

    Ok(())
}
