use seatforge::arrangement::{FixedSet, SeatCoord};
use seatforge::error::SeatError;
use seatforge::optimizer::{sweep, NoProgress, ProgressSink, ProgressUpdate, SweepGrid, SweepRange};

mod common;
use common::{arrangement, classroom, default_scorer, fast_options, table};

fn grid(temps: SweepRange, rates: SweepRange) -> SweepGrid {
    SweepGrid {
        initial_temperature: temps,
        cooling_rate: rates,
    }
}

fn start() -> seatforge::arrangement::Arrangement {
    arrangement(vec![
        table(&["Ada", "Cy", "Eve"], &["Gus", "Ivy", "Kim"]),
        table(&["Ben", "Dee", "Fay"], &["Hal", "Jo", "Lou"]),
    ])
}

#[test]
fn test_grid_is_temperature_major() {
    let g = grid(
        SweepRange { min: 1.0, max: 3.0, step: 1.0 },
        SweepRange { min: 0.5, max: 0.6, step: 0.1 },
    );
    let points = g.points().unwrap();
    assert_eq!(points.len(), 6);
    assert_eq!(points[0], (1.0, 0.5));
    assert_eq!(points[1].0, 1.0);
    assert!((points[1].1 - 0.6).abs() < 1e-12);
    assert_eq!(points[2].0, 2.0);
    assert_eq!(points[5].0, 3.0);
}

#[test]
fn test_oversized_grid_rejected() {
    let g = grid(
        SweepRange { min: 1.0, max: 1000.0, step: 1.0 },
        SweepRange { min: 0.1, max: 0.9, step: 0.01 },
    );
    assert!(matches!(g.points(), Err(SeatError::Config(_))));
}

#[test]
fn test_sweep_picks_best_point() {
    let scorer = default_scorer(classroom().arc());
    let g = grid(
        SweepRange { min: 5.0, max: 50.0, step: 45.0 },
        SweepRange { min: 0.99, max: 0.999, step: 0.009 },
    );
    let outcome = sweep(
        scorer.clone(),
        &fast_options(2_000, 1, 17),
        &g,
        &start(),
        &FixedSet::default(),
        &NoProgress,
    )
    .unwrap();

    assert_eq!(outcome.points.len(), 4);
    let max = outcome
        .points
        .iter()
        .map(|p| p.score)
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(outcome.score, max);
    assert_eq!(outcome.score, scorer.score(&outcome.arrangement));

    let winner = outcome
        .points
        .iter()
        .position(|p| p.score == max)
        .unwrap();
    assert_eq!(outcome.initial_temperature, outcome.points[winner].initial_temperature);
    assert_eq!(outcome.cooling_rate, outcome.points[winner].cooling_rate);
}

#[test]
fn test_ties_keep_first_point() {
    let scorer = default_scorer(classroom().arc());
    let start = start();
    // Nothing can move, so every point scores the same.
    let fixed = FixedSet::new(start.coords(scorer.bonus_config()).collect::<Vec<SeatCoord>>());
    let g = grid(
        SweepRange { min: 10.0, max: 30.0, step: 10.0 },
        SweepRange::single(0.99),
    );
    let outcome = sweep(
        scorer,
        &fast_options(1_000, 2, 1),
        &g,
        &start,
        &fixed,
        &NoProgress,
    )
    .unwrap();

    assert_eq!(outcome.points.len(), 3);
    assert_eq!(outcome.initial_temperature, 10.0);
    assert_eq!(outcome.arrangement, start);
}

#[test]
fn test_invalid_point_fails_before_running() {
    let scorer = default_scorer(classroom().arc());
    // The second cooling rate lands on 1.0, which is not a valid schedule.
    let g = grid(
        SweepRange::single(10.0),
        SweepRange { min: 0.5, max: 1.0, step: 0.5 },
    );
    let err = sweep(
        scorer,
        &fast_options(1_000, 1, 1),
        &g,
        &start(),
        &FixedSet::default(),
        &NoProgress,
    )
    .unwrap_err();
    assert!(matches!(err, SeatError::Config(_)));
}

#[test]
fn test_cancelled_sweep_reports_error() {
    struct Stop;
    impl ProgressSink for Stop {
        fn on_progress(&self, _update: &ProgressUpdate) {}
        fn should_stop(&self) -> bool {
            true
        }
    }

    let scorer = default_scorer(classroom().arc());
    let g = grid(SweepRange::single(10.0), SweepRange::single(0.99));
    let result = sweep(
        scorer,
        &fast_options(1_000, 1, 1),
        &g,
        &start(),
        &FixedSet::default(),
        &Stop,
    );
    assert!(matches!(result, Err(SeatError::Validation(_))));
}
