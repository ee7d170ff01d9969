pub mod itinerary;
pub mod routes;
pub mod schedule;
