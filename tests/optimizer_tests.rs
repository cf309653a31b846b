use seatforge::arrangement::{Arrangement, FixedSet, SeatCoord};
use seatforge::error::SeatError;
use seatforge::optimizer::moves::free_coordinates;
use seatforge::optimizer::{
    AnnealSchedule, NoProgress, OptimizationOptions, Optimizer, Phase, ProgressSink,
    ProgressUpdate,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

mod common;
use common::{arrangement, classroom, default_scorer, fast_options, table};

/// Two tables of 3+3, the classroom seated in roster order.
fn classroom_start() -> Arrangement {
    arrangement(vec![
        table(&["Ada", "Cy", "Eve"], &["Gus", "Ivy", "Kim"]),
        table(&["Ben", "Dee", "Fay"], &["Hal", "Jo", "Lou"]),
    ])
}

#[derive(Default)]
struct Recorder {
    updates: Mutex<Vec<ProgressUpdate>>,
}

impl ProgressSink for Recorder {
    fn on_progress(&self, update: &ProgressUpdate) {
        self.updates.lock().unwrap().push(*update);
    }
}

/// Stops every run before the first iteration.
struct StopImmediately;

impl ProgressSink for StopImmediately {
    fn on_progress(&self, _update: &ProgressUpdate) {}

    fn should_stop(&self) -> bool {
        true
    }
}

#[test]
fn test_improves_on_a_bad_start() {
    let scorer = default_scorer(classroom().arc());
    let start = classroom_start();
    let before = scorer.score(&start);

    let optimizer = Optimizer::new(scorer.clone(), fast_options(20_000, 2, 42)).unwrap();
    let result = optimizer.run(&start, &FixedSet::default(), &NoProgress).unwrap();

    assert!(result.score >= before);
    assert!(result.score > 0.0, "score was {}", result.score);
    assert_eq!(result.runs.len(), 2);
    assert!(result.best_run.is_some());
}

#[test]
fn test_reported_score_matches_rescore() {
    let scorer = default_scorer(classroom().arc());
    let optimizer = Optimizer::new(scorer.clone(), fast_options(5_000, 3, 9)).unwrap();
    let result = optimizer
        .run(&classroom_start(), &FixedSet::default(), &NoProgress)
        .unwrap();

    assert_eq!(result.score, scorer.score(&result.arrangement));
    let best = result.best_run.unwrap();
    assert_eq!(result.runs[best].best_score, result.score);
}

#[test]
fn test_everyone_stays_seated_once() {
    let scorer = default_scorer(classroom().arc());
    let optimizer = Optimizer::new(scorer.clone(), fast_options(5_000, 2, 3)).unwrap();
    let start = classroom_start();
    let result = optimizer.run(&start, &FixedSet::default(), &NoProgress).unwrap();

    let bonus = scorer.bonus_config();
    assert!(result.arrangement.validate(bonus).is_ok());

    let mut before: Vec<&str> = start.occupied(bonus).map(|(_, id)| id).collect();
    let mut after: Vec<&str> = result.arrangement.occupied(bonus).map(|(_, id)| id).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn test_fixed_seats_never_move() {
    let scorer = default_scorer(classroom().arc());
    let start = classroom_start();
    let pins = [
        SeatCoord::top(0, 0),
        SeatCoord::bottom(1, 2),
        SeatCoord::top(1, 1),
    ];
    let fixed = FixedSet::new(pins);

    let optimizer = Optimizer::new(scorer, fast_options(10_000, 3, 5)).unwrap();
    let result = optimizer.run(&start, &fixed, &NoProgress).unwrap();

    for coord in &pins {
        assert_eq!(result.arrangement.get(coord), start.get(coord), "{}", coord);
    }
}

#[test]
fn test_input_is_not_modified() {
    let scorer = default_scorer(classroom().arc());
    let start = classroom_start();
    let copy = start.clone();
    let optimizer = Optimizer::new(scorer, fast_options(2_000, 2, 1)).unwrap();
    optimizer.run(&start, &FixedSet::default(), &NoProgress).unwrap();
    assert_eq!(start, copy);
}

#[test]
fn test_fewer_than_two_free_seats_returns_input() {
    let scorer = default_scorer(classroom().arc());
    let start = classroom_start();

    // Pin all but one seat.
    let mut coords: Vec<SeatCoord> = start.coords(scorer.bonus_config()).collect();
    coords.pop();
    let fixed = FixedSet::new(coords);

    let optimizer = Optimizer::new(scorer.clone(), fast_options(1_000, 4, 7)).unwrap();
    let result = optimizer.run(&start, &fixed, &NoProgress).unwrap();

    assert_eq!(result.arrangement, start);
    assert_eq!(result.score, scorer.score(&start));
    assert!(result.runs.is_empty());
    assert_eq!(result.best_run, None);
}

#[test]
fn test_best_score_never_decreases_within_a_run() {
    let scorer = default_scorer(classroom().arc());
    let optimizer = Optimizer::new(scorer, fast_options(8_192, 2, 11)).unwrap();
    let recorder = Recorder::default();
    optimizer
        .run(&classroom_start(), &FixedSet::default(), &recorder)
        .unwrap();

    let updates = recorder.updates.into_inner().unwrap();
    assert!(!updates.is_empty());
    for run_id in 0..2 {
        let phases: Vec<Phase> = updates
            .iter()
            .filter(|u| u.run_id == run_id)
            .map(|u| u.phase)
            .collect();
        // Eight annealing reports, then at least one refinement pass.
        assert_eq!(phases.iter().filter(|p| **p == Phase::Annealing).count(), 8);
        let first_refine = phases.iter().position(|p| *p == Phase::Refining).unwrap();
        assert!(phases[first_refine..].iter().all(|p| *p == Phase::Refining));

        let scores: Vec<f64> = updates
            .iter()
            .filter(|u| u.run_id == run_id)
            .map(|u| u.best_score)
            .collect();
        assert!(
            scores.windows(2).all(|w| w[1] >= w[0]),
            "run {} went backwards: {:?}",
            run_id,
            scores
        );
    }
}

#[test]
fn test_perfect_start_stops_immediately() {
    let scorer = default_scorer(classroom().arc());
    // Every person with wishes has a wished-for neighbor.
    let perfect = arrangement(vec![
        table(&["Ada", "Ben", "Ivy"], &["Eve", "Fay", "Jo"]),
        table(&["Cy", "Dee", "Kim"], &["Gus", "Hal", "Lou"]),
    ]);
    assert!(scorer.is_perfect(&perfect));

    let options = OptimizationOptions::builder()
        .schedule(
            AnnealSchedule::builder()
                .iterations(50_000)
                .initial_temperature(100.0)
                .cooling_rate(0.999)
                .early_stop(true)
                .build(),
        )
        .parallel_runs(2)
        .seed(1)
        .build();
    let optimizer = Optimizer::new(scorer.clone(), options).unwrap();
    let result = optimizer.run(&perfect, &FixedSet::default(), &NoProgress).unwrap();

    assert_eq!(result.arrangement, perfect);
    for run in &result.runs {
        assert!(run.early_stopped);
        assert_eq!(run.iterations, 0);
        assert_eq!(run.refine_passes, 0);
    }
}

#[test]
fn test_early_stop_finds_perfect_seating() {
    let scorer = default_scorer(classroom().arc());
    let options = OptimizationOptions::builder()
        .schedule(
            AnnealSchedule::builder()
                .iterations(200_000)
                .initial_temperature(50.0)
                .cooling_rate(0.9995)
                .early_stop(true)
                .build(),
        )
        .parallel_runs(1)
        .seed(21)
        .build();
    let optimizer = Optimizer::new(scorer.clone(), options).unwrap();
    let result = optimizer
        .run(&classroom_start(), &FixedSet::default(), &NoProgress)
        .unwrap();

    let run = &result.runs[0];
    assert!(run.early_stopped);
    assert!(run.iterations < 200_000);
    assert_eq!(run.refine_passes, 0);
    assert!(scorer.is_perfect(&result.arrangement));
}

#[test]
fn test_refinement_ends_in_a_local_optimum() {
    let scorer = default_scorer(classroom().arc());
    let bonus = scorer.bonus_config();
    // Twelve people spread over sixteen seats, so gaps are in play too.
    let start = arrangement(vec![
        table(&["Ada", "", "Cy", "Eve"], &["Gus", "Ivy", "", "Kim"]),
        table(&["Ben", "Dee", "", "Fay"], &["", "Hal", "Jo", "Lou"]),
    ]);
    let fixed = FixedSet::new([SeatCoord::top(0, 0)]);
    let free = free_coordinates(&start, &fixed, bonus);

    for seed in 0..10 {
        let optimizer = Optimizer::new(scorer.clone(), fast_options(300, 1, seed)).unwrap();
        let result = optimizer.run(&start, &fixed, &NoProgress).unwrap();
        assert!(result.runs[0].refine_passes >= 1, "seed {}", seed);

        for i in 0..free.len() {
            for j in (i + 1)..free.len() {
                let mut candidate = result.arrangement.clone();
                candidate.swap(&free[i], &free[j]);
                let score = scorer.score(&candidate);
                assert!(
                    score <= result.score,
                    "seed {}: swapping {} and {} gives {} over {}",
                    seed,
                    free[i],
                    free[j],
                    score,
                    result.score
                );
            }
        }
    }
}

#[test]
fn test_cancel_returns_initial_arrangement() {
    let scorer = default_scorer(classroom().arc());
    let start = classroom_start();
    let optimizer = Optimizer::new(scorer.clone(), fast_options(100_000, 3, 2)).unwrap();
    let result = optimizer
        .run(&start, &FixedSet::default(), &StopImmediately)
        .unwrap();

    assert_eq!(result.arrangement, start);
    assert!(result.runs.iter().all(|r| r.cancelled && r.iterations == 0));
    assert_eq!(result.best_run, Some(0));
}

#[test]
fn test_cancel_midway_keeps_best_so_far() {
    struct StopAfterFirstReport(AtomicBool);

    impl ProgressSink for StopAfterFirstReport {
        fn on_progress(&self, _update: &ProgressUpdate) {
            self.0.store(true, Ordering::Relaxed);
        }

        fn should_stop(&self) -> bool {
            self.0.load(Ordering::Relaxed)
        }
    }

    let scorer = default_scorer(classroom().arc());
    let start = classroom_start();
    let optimizer = Optimizer::new(scorer.clone(), fast_options(1_000_000, 1, 8)).unwrap();
    let sink = StopAfterFirstReport(AtomicBool::new(false));
    let result = optimizer.run(&start, &FixedSet::default(), &sink).unwrap();

    let run = &result.runs[0];
    assert!(run.cancelled);
    assert!(run.iterations < 1_000_000);
    assert!(result.score >= scorer.score(&start));
    assert_eq!(result.score, scorer.score(&result.arrangement));
}

#[test]
fn test_winner_is_highest_scoring_run() {
    let scorer = default_scorer(classroom().arc());
    let optimizer = Optimizer::new(scorer, fast_options(3_000, 5, 100)).unwrap();
    let result = optimizer
        .run(&classroom_start(), &FixedSet::default(), &NoProgress)
        .unwrap();

    let best = result.best_run.unwrap();
    let max = result
        .runs
        .iter()
        .map(|r| r.best_score)
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(result.runs[best].best_score, max);
    // Ties go to the lowest index.
    assert!(result.runs[..best].iter().all(|r| r.best_score < max));
}

#[test]
fn test_invalid_options_rejected() {
    let scorer = default_scorer(classroom().arc());

    let zero_runs = OptimizationOptions::builder().parallel_runs(0).build();
    assert!(matches!(
        Optimizer::new(scorer.clone(), zero_runs),
        Err(SeatError::Config(_))
    ));

    let hot = OptimizationOptions::builder()
        .schedule(AnnealSchedule::builder().cooling_rate(1.5).build())
        .build();
    assert!(Optimizer::new(scorer, hot).is_err());
}

#[test]
fn test_rejects_invalid_input() {
    let scorer = default_scorer(classroom().arc());
    let optimizer = Optimizer::new(scorer, fast_options(100, 1, 1)).unwrap();

    let twice = arrangement(vec![table(&["Ada", "Ada"], &["", ""])]);
    assert!(matches!(
        optimizer.run(&twice, &FixedSet::default(), &NoProgress),
        Err(SeatError::Validation(_))
    ));

    let ragged = arrangement(vec![table(&["Ada", "Ben"], &["Cy"])]);
    assert!(optimizer
        .run(&ragged, &FixedSet::default(), &NoProgress)
        .is_err());

    let bad_pin = FixedSet::new([SeatCoord::top(5, 0)]);
    assert!(optimizer
        .run(&classroom_start(), &bad_pin, &NoProgress)
        .is_err());
}
