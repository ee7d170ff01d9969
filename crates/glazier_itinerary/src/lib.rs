pub mod aggregator;
pub mod cache;
pub mod cache_key;
pub mod clock;
pub mod config;
pub mod generations;
pub mod itinerary;
pub mod json;
pub mod legs;
pub mod schedule;
pub mod stop;
pub mod trip_selection;

#[cfg(test)]
pub(crate) mod test_utils;
