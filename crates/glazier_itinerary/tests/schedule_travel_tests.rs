use glazier_itinerary::{
    json::types::JsonDayTravel,
    schedule::ScheduleDay,
    trip_selection::{PlanOptions, TripChoice, plan_schedule_travel},
};
use glazier_matrix_providers::matrix_error::MatrixError;
use jiff::civil::date;

mod setup;

use setup::{FakeMatrixSource, create_aggregator, cycle_matrices, stop};

fn lakes_days() -> Vec<ScheduleDay> {
    vec![
        ScheduleDay {
            date: date(2026, 3, 2),
            area: Some("Lakes".to_string()),
            stops: vec![stop("job-1", 54.43, -2.96)],
        },
        ScheduleDay {
            date: date(2026, 3, 3),
            area: Some("lakes ".to_string()),
            stops: vec![stop("job-2", 54.37, -2.91)],
        },
    ]
}

/// Single days come back with 2500 m each way, the block with the given first leg and a
/// 300 km total.
fn source_with_block_first_leg(first_leg_meters: f64) -> FakeMatrixSource {
    FakeMatrixSource::new(move |points| match points.len() {
        2 => Ok(cycle_matrices(&[(2_500.0, 300.0), (2_500.0, 300.0)])),
        3 => Ok(cycle_matrices(&[
            (first_leg_meters, 9_000.0),
            (10_000.0, 900.0),
            (290_000.0 - first_leg_meters, 9_000.0),
        ])),
        n => Err(MatrixError::MalformedResponse(format!("unexpected {n} points"))),
    })
}

#[tokio::test]
async fn test_far_block_replaces_single_day_totals() {
    let (aggregator, _) = create_aggregator(source_with_block_first_leg(250_000.0));
    let days = lakes_days();

    let travel = plan_schedule_travel(&aggregator, &days, &PlanOptions::default()).await;

    assert_eq!(travel.len(), 2);
    for day in &travel {
        assert_eq!(day.choice, TripChoice::Block);
        assert_eq!(day.single_day.as_ref().unwrap().total_distance_meters, 5_000);

        let displayed = day.displayed().as_ref().unwrap();
        assert_eq!(displayed.total_distance_meters, 300_000);
        assert_eq!(displayed.label, "2026-03-02_2026-03-03");
    }
}

#[tokio::test]
async fn test_near_block_keeps_single_day_totals() {
    let (aggregator, _) = create_aggregator(source_with_block_first_leg(150_000.0));
    let days = lakes_days();

    let travel = plan_schedule_travel(&aggregator, &days, &PlanOptions::default()).await;

    for day in &travel {
        assert_eq!(day.choice, TripChoice::SingleDay);
        assert!(day.block.is_some());
        assert_eq!(
            day.displayed().as_ref().unwrap().total_distance_meters,
            5_000
        );
    }
}

#[tokio::test]
async fn test_block_is_computed_once() {
    let (aggregator, _) = create_aggregator(source_with_block_first_leg(250_000.0));
    let days = lakes_days();

    plan_schedule_travel(&aggregator, &days, &PlanOptions::default()).await;

    // two single days plus one block
    assert_eq!(aggregator.source().calls(), 3);

    let block_request = aggregator
        .source()
        .requests()
        .into_iter()
        .find(|points| points.len() == 3)
        .unwrap();
    assert_eq!(block_request[1], (-2.96, 54.43));
    assert_eq!(block_request[2], (-2.91, 54.37));
}

#[tokio::test]
async fn test_second_plan_is_served_from_cache() {
    let (aggregator, _) = create_aggregator(source_with_block_first_leg(250_000.0));
    let days = lakes_days();

    plan_schedule_travel(&aggregator, &days, &PlanOptions::default()).await;
    plan_schedule_travel(&aggregator, &days, &PlanOptions::default()).await;
    assert_eq!(aggregator.source().calls(), 3);

    let force = PlanOptions {
        force: true,
        ..Default::default()
    };
    plan_schedule_travel(&aggregator, &days, &force).await;
    assert_eq!(aggregator.source().calls(), 6);
}

#[tokio::test]
async fn test_days_without_area_are_measured_alone() {
    let (aggregator, _) = create_aggregator(source_with_block_first_leg(250_000.0));
    let mut days = lakes_days();
    days[1].area = None;

    let travel = plan_schedule_travel(&aggregator, &days, &PlanOptions::default()).await;

    assert!(travel.iter().all(|day| day.block.is_none()));
    assert!(travel.iter().all(|day| day.choice == TripChoice::SingleDay));
    assert_eq!(aggregator.source().calls(), 2);
}

#[tokio::test]
async fn test_one_failing_day_does_not_hide_the_others() {
    let (aggregator, _) = create_aggregator(FakeMatrixSource::new(|points| {
        if points.iter().any(|point| point.y() == 54.37) {
            Err(MatrixError::Api {
                status: 502,
                body: "bad gateway".to_string(),
            })
        } else {
            Ok(setup::index_matrices(points.len()))
        }
    }));
    let days = lakes_days();

    let travel = plan_schedule_travel(&aggregator, &days, &PlanOptions::default()).await;

    assert!(travel[0].single_day.is_ok());
    assert!(travel[1].single_day.is_err());
    // the block contains the failing stop, both days show their own figures and the
    // block failure alongside
    assert!(travel[0].block.as_ref().unwrap().itinerary.is_err());
    assert_eq!(travel[0].choice, TripChoice::SingleDay);
    assert!(travel[0].displayed().is_ok());
    assert!(travel[0].block_error().is_some());
    assert!(travel[1].block_error().is_some());
    assert!(
        travel[1]
            .displayed()
            .as_ref()
            .unwrap_err()
            .to_string()
            .contains("bad gateway")
    );
}

#[tokio::test]
async fn test_failed_block_is_reported_in_day_output() {
    let (aggregator, _) = create_aggregator(FakeMatrixSource::new(|points| {
        if points.len() == 3 {
            Err(MatrixError::Api {
                status: 502,
                body: "block upstream down".to_string(),
            })
        } else {
            Ok(cycle_matrices(&[(2_500.0, 300.0), (2_500.0, 300.0)]))
        }
    }));
    let days = lakes_days();

    let travel = plan_schedule_travel(&aggregator, &days, &PlanOptions::default()).await;
    let json = JsonDayTravel::from(&travel[0]);

    assert_eq!(json.choice, TripChoice::SingleDay);
    assert_eq!(json.block_label.as_deref(), Some("2026-03-02_2026-03-03"));
    assert_eq!(json.itinerary.as_ref().unwrap().total_distance_meters, 5_000);
    assert!(json.error.is_none());
    assert!(json.block_error.unwrap().contains("block upstream down"));
}

#[tokio::test]
async fn test_empty_day_inside_a_block() {
    let (aggregator, _) = create_aggregator(FakeMatrixSource::new(|points| {
        Ok(setup::index_matrices(points.len()))
    }));
    let mut days = lakes_days();
    days[1].stops.clear();

    let travel = plan_schedule_travel(&aggregator, &days, &PlanOptions::default()).await;

    assert!(travel[1].single_day.as_ref().unwrap().legs.is_empty());
    // block still measured with the first day's stop
    let block = travel[1].block.as_ref().unwrap();
    assert_eq!(block.itinerary.as_ref().unwrap().legs.len(), 2);
}
