use glazier_itinerary::{aggregator::RouteMetricsAggregator, config::AggregatorConfig};
use glazier_matrix_providers::{
    matrix_source::ProviderBoundClient, travel_matrix_client::TravelMatrixClient,
    travel_matrix_provider::TravelMatrixProvider,
};

pub struct AppState {
    pub aggregator: RouteMetricsAggregator<ProviderBoundClient>,
}

impl AppState {
    pub fn new(
        client: TravelMatrixClient,
        provider: TravelMatrixProvider,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            aggregator: RouteMetricsAggregator::new(
                ProviderBoundClient::new(client, provider),
                config,
            ),
        }
    }
}
