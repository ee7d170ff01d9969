pub mod as_the_crow_flies;
pub mod graphhopper_api;
pub mod matrix_error;
pub mod matrix_source;
pub mod travel_matrices;
pub mod travel_matrix_client;
pub mod travel_matrix_provider;
