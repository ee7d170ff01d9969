use std::{fmt::Display, str::FromStr, time::Duration};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{matrix_error::MatrixError, travel_matrices::TravelMatrices};

pub type GHPoint = [f64; 2];

pub const GRAPHHOPPER_API_KEY_ENV_VAR: &str = "GRAPHHOPPER_API_KEY";
pub const GRAPHHOPPER_API_URL_ENV_VAR: &str = "GRAPHHOPPER_API_URL";
pub const GRAPHHOPPER_API_URL: &str = "https://graphhopper.com/api/1";

#[derive(Deserialize, Serialize, JsonSchema, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GraphHopperProfile {
    #[default]
    Car,
    Bike,
    Foot,
    SmallTruck,
    Truck,
}

impl Display for GraphHopperProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GraphHopperProfile::Car => "car",
                GraphHopperProfile::Bike => "bike",
                GraphHopperProfile::Foot => "foot",
                GraphHopperProfile::SmallTruck => "small_truck",
                GraphHopperProfile::Truck => "truck",
            }
        )
    }
}

impl FromStr for GraphHopperProfile {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "car" => Ok(GraphHopperProfile::Car),
            "bike" => Ok(GraphHopperProfile::Bike),
            "foot" => Ok(GraphHopperProfile::Foot),
            "small_truck" => Ok(GraphHopperProfile::SmallTruck),
            "truck" => Ok(GraphHopperProfile::Truck),
            other => Err(format!("Unknown GraphHopper profile: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixRequestBody {
    /// Points for symmetric matrix (all-to-all), as `[lng, lat]`
    pub points: Vec<GHPoint>,

    /// Which arrays to return: "weights", "times", "distances"
    pub out_arrays: Vec<String>,

    /// Routing profile (e.g., "car", "bike", "foot")
    pub profile: String,

    /// Fail fast on unreachable points
    pub fail_fast: bool,
}

#[derive(Deserialize)]
struct MatrixSolution {
    /// Travel times in seconds
    times: Option<Vec<Vec<f64>>>,

    /// Distances in meters
    distances: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone)]
pub struct GraphhopperMatrixClientParams {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl GraphhopperMatrixClientParams {
    /// Reads the credential and endpoint from the environment. A missing key is not an
    /// error here, it is reported by the first matrix request.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(GRAPHHOPPER_API_KEY_ENV_VAR)
                .ok()
                .filter(|key| !key.trim().is_empty()),
            base_url: std::env::var(GRAPHHOPPER_API_URL_ENV_VAR)
                .unwrap_or_else(|_| GRAPHHOPPER_API_URL.to_string()),
            ..Default::default()
        }
    }
}

impl Default for GraphhopperMatrixClientParams {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: GRAPHHOPPER_API_URL.to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

pub struct GraphHopperMatrixClient {
    params: GraphhopperMatrixClientParams,
    client: reqwest::Client,
}

impl GraphHopperMatrixClient {
    pub fn new(params: GraphhopperMatrixClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    fn matrix_url(&self) -> String {
        format!("{}/matrix", self.params.base_url.trim_end_matches('/'))
    }

    /// One synchronous matrix request. Never retried, a failure is returned as is.
    pub async fn fetch_matrix<P>(
        &self,
        points: &[P],
        profile: GraphHopperProfile,
    ) -> Result<TravelMatrices, MatrixError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let api_key = self
            .params
            .api_key
            .as_deref()
            .ok_or(MatrixError::MissingApiKey(GRAPHHOPPER_API_KEY_ENV_VAR))?;

        if points.is_empty() {
            return Ok(TravelMatrices::default());
        }

        let gh_points: Vec<GHPoint> = points
            .iter()
            .map(|p| {
                let point: geo_types::Point = p.into();
                [point.x(), point.y()]
            })
            .collect();

        let body = MatrixRequestBody {
            points: gh_points,
            out_arrays: vec!["distances".to_string(), "times".to_string()],
            profile: profile.to_string(),
            fail_fast: true,
        };

        debug!(
            "GraphHopperApi: Posting matrix request for {} points ({})",
            body.points.len(),
            profile
        );

        let response = self
            .client
            .post(self.matrix_url())
            .query(&[("key", api_key)])
            .timeout(self.params.timeout)
            .json(&body)
            .send()
            .await?;

        let solution = self.handle_response(response).await?;

        let distances = solution.distances.ok_or_else(|| {
            MatrixError::MalformedResponse("response has no distances matrix".to_string())
        })?;
        let times = solution.times.ok_or_else(|| {
            MatrixError::MalformedResponse("response has no times matrix".to_string())
        })?;

        TravelMatrices::from_rows(distances, times, points.len())
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<MatrixSolution, MatrixError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("GraphHopperApi: Matrix request failed with {}", status);
            return Err(MatrixError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|err| MatrixError::MalformedResponse(err.to_string()))
    }
}
