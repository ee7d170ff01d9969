use crate::{
    matrix_error::MatrixError, travel_matrices::TravelMatrices,
    travel_matrix_client::TravelMatrixClient, travel_matrix_provider::TravelMatrixProvider,
};

/// Something that can produce square distance/time matrices for an ordered list of
/// points. Index `i` of the result refers to `points[i]`.
pub trait MatrixSource: Send + Sync {
    fn fetch_matrix<P>(
        &self,
        points: &[P],
    ) -> impl Future<Output = Result<TravelMatrices, MatrixError>> + Send
    where
        P: Sync,
        for<'a> &'a P: Into<geo_types::Point>;
}

/// A [`TravelMatrixClient`] pinned to one provider.
pub struct ProviderBoundClient {
    client: TravelMatrixClient,
    provider: TravelMatrixProvider,
}

impl ProviderBoundClient {
    pub fn new(client: TravelMatrixClient, provider: TravelMatrixProvider) -> Self {
        Self { client, provider }
    }

    pub fn provider(&self) -> &TravelMatrixProvider {
        &self.provider
    }
}

impl MatrixSource for ProviderBoundClient {
    async fn fetch_matrix<P>(&self, points: &[P]) -> Result<TravelMatrices, MatrixError>
    where
        P: Sync,
        for<'a> &'a P: Into<geo_types::Point>,
    {
        self.client.fetch_matrix(points, &self.provider).await
    }
}
