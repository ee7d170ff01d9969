use crate::{
    as_the_crow_flies::{as_the_crow_flies_matrices, is_valid_speed_kmh},
    graphhopper_api::{GraphHopperMatrixClient, GraphhopperMatrixClientParams},
    matrix_error::MatrixError,
    travel_matrices::TravelMatrices,
    travel_matrix_provider::TravelMatrixProvider,
};

pub struct TravelMatrixClient {
    graphhopper_client: GraphHopperMatrixClient,
}

impl Default for TravelMatrixClient {
    fn default() -> Self {
        Self::new(GraphhopperMatrixClientParams::from_env())
    }
}

impl TravelMatrixClient {
    pub fn new(params: GraphhopperMatrixClientParams) -> Self {
        Self {
            graphhopper_client: GraphHopperMatrixClient::new(params),
        }
    }

    pub async fn fetch_matrix<P>(
        &self,
        points: &[P],
        provider: &TravelMatrixProvider,
    ) -> Result<TravelMatrices, MatrixError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        match provider {
            TravelMatrixProvider::GraphHopperApi {
                gh_profile: profile,
            } => self.graphhopper_client.fetch_matrix(points, *profile).await,
            TravelMatrixProvider::AsTheCrowFlies { speed_kmh } => {
                if !is_valid_speed_kmh(*speed_kmh) {
                    return Err(MatrixError::InvalidSpeed(*speed_kmh));
                }
                Ok(as_the_crow_flies_matrices(points, *speed_kmh))
            }
            TravelMatrixProvider::Custom { matrices } => {
                matrices.ensure_dimension(points.len())?;
                Ok(matrices.clone())
            }
        }
    }
}
