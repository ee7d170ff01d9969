use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Args;
use comfy_table::Table;
use glazier_itinerary::{
    aggregator::RouteMetricsAggregator,
    config::AggregatorConfig,
    json::types::{JsonDayTravel, JsonScheduleInput},
    trip_selection::{DayTravel, PlanOptions, TripChoice, plan_schedule_travel},
};
use glazier_matrix_providers::{
    as_the_crow_flies::parse_speed_kmh,
    graphhopper_api::GraphHopperProfile, matrix_source::ProviderBoundClient,
    travel_matrix_client::TravelMatrixClient, travel_matrix_provider::TravelMatrixProvider,
};
use tracing::info;

use crate::format::{format_distance_km, format_duration};

#[derive(Args)]
pub struct TravelArgs {
    /// The schedule file
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Straight-line distances at this speed instead of GraphHopper
    #[arg(long, value_parser = parse_speed_kmh)]
    crow_flies_kmh: Option<f64>,

    /// GraphHopper routing profile
    #[arg(long, default_value = "car")]
    profile: GraphHopperProfile,

    /// Print the displayed itineraries as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: TravelArgs) -> anyhow::Result<()> {
    let file = File::open(&args.input)?;
    let input: JsonScheduleInput = serde_json::from_reader(BufReader::new(file))?;

    let provider = match args.crow_flies_kmh {
        Some(speed_kmh) => TravelMatrixProvider::AsTheCrowFlies { speed_kmh },
        None => TravelMatrixProvider::GraphHopperApi {
            gh_profile: args.profile,
        },
    };

    let aggregator = RouteMetricsAggregator::new(
        ProviderBoundClient::new(TravelMatrixClient::default(), provider),
        AggregatorConfig::from_env()?,
    );

    let days = input.schedule_days()?;
    info!("Computing travel for {} days", days.len());

    let travel = plan_schedule_travel(
        &aggregator,
        &days,
        &PlanOptions {
            force: false,
            base_address: input.base_address.clone(),
        },
    )
    .await;

    if args.json {
        let days = travel.iter().map(JsonDayTravel::from).collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&days)?);
    } else {
        println!("{}", travel_table(&travel));
    }

    Ok(())
}

fn travel_table(travel: &[DayTravel]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Area", "Trip", "Stops", "Distance", "Duration"]);

    for day in travel {
        let trip = match (day.choice, &day.block, day.block_error()) {
            (_, Some(block), Some(err)) => {
                format!("day (block {} unavailable: {err})", block.block.label())
            }
            (TripChoice::Block, Some(block), None) => format!("block {}", block.block.label()),
            _ => "day".to_string(),
        };

        let row = match day.displayed() {
            Ok(itinerary) => vec![
                day.date.to_string(),
                day.area.clone().unwrap_or_default(),
                trip,
                itinerary.stops.len().to_string(),
                format_distance_km(itinerary.total_distance_meters),
                format_duration(itinerary.total_duration_seconds),
            ],
            Err(err) => vec![
                day.date.to_string(),
                day.area.clone().unwrap_or_default(),
                trip,
                "-".to_string(),
                "Travel unavailable".to_string(),
                err.to_string(),
            ],
        };

        table.add_row(row);
    }

    table
}
