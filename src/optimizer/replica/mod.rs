pub mod anneal;
pub mod delta;
pub mod refine;

use self::delta::TableCache;
use super::progress::ProgressSink;
use super::AnnealSchedule;
use crate::arrangement::{Arrangement, SeatCoord};
use crate::scorer::Scorer;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Annealing,
    Refining,
    Done,
}

/// How annealing ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnealExit {
    Completed,
    Perfect,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: usize,
    pub seed: Option<u64>,
    pub iterations: usize,
    pub accepted: usize,
    pub refine_passes: usize,
    pub refine_improvements: usize,
    pub best_score: f64,
    pub early_stopped: bool,
    pub cancelled: bool,
    pub anneal_ms: u64,
    pub refine_ms: u64,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub arrangement: Arrangement,
}

/// One independent annealing run. Owns its working copies outright.
pub struct Replica {
    pub scorer: Arc<Scorer>,
    pub free: Arc<[SeatCoord]>,
    pub schedule: AnnealSchedule,
    pub run_id: usize,
    pub seed: Option<u64>,

    pub current: Arrangement,
    pub cache: TableCache,
    pub best: Arrangement,
    pub best_score: f64,

    pub temperature: f64,
    pub phase: Phase,
    pub rng: Rng,

    pub iterations: usize,
    pub accepted: usize,
    pub refine_passes: usize,
    pub refine_improvements: usize,
}

impl Replica {
    pub fn new(
        scorer: Arc<Scorer>,
        free: Arc<[SeatCoord]>,
        initial: Arrangement,
        schedule: AnnealSchedule,
        run_id: usize,
        seed: Option<u64>,
    ) -> Self {
        let rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };

        let cache = TableCache::build(&scorer, &initial);
        let best_score = cache.total();

        Replica {
            scorer,
            free,
            schedule,
            run_id,
            seed,
            best: initial.clone(),
            current: initial,
            cache,
            best_score,
            temperature: schedule.initial_temperature,
            phase: Phase::Annealing,
            rng,
            iterations: 0,
            accepted: 0,
            refine_passes: 0,
            refine_improvements: 0,
        }
    }

    /// Runs annealing then, unless it stopped early, local refinement.
    pub fn solve<S: ProgressSink + ?Sized>(mut self, sink: &S) -> RunOutcome {
        let start = Instant::now();

        let exit = if self.schedule.early_stop && self.scorer.is_perfect(&self.best) {
            debug!("Run {}: initial arrangement already perfect", self.run_id);
            AnnealExit::Perfect
        } else {
            self.phase = Phase::Annealing;
            self.anneal(sink)
        };
        let anneal_ms = start.elapsed().as_millis() as u64;

        let refine_start = Instant::now();
        if exit == AnnealExit::Completed {
            self.phase = Phase::Refining;
            self.refine(sink);
        }
        let refine_ms = refine_start.elapsed().as_millis() as u64;
        self.phase = Phase::Done;

        let summary = RunSummary {
            run_id: self.run_id,
            seed: self.seed,
            iterations: self.iterations,
            accepted: self.accepted,
            refine_passes: self.refine_passes,
            refine_improvements: self.refine_improvements,
            best_score: self.best_score,
            early_stopped: exit == AnnealExit::Perfect,
            cancelled: exit == AnnealExit::Cancelled,
            anneal_ms,
            refine_ms,
        };

        debug!(
            "Run {} done: score {:.3}, {} iterations, {} accepted, early stop {}",
            summary.run_id,
            summary.best_score,
            summary.iterations,
            summary.accepted,
            summary.early_stopped
        );

        RunOutcome {
            summary,
            arrangement: self.best,
        }
    }

    /// Records `current` as the new best.
    #[inline]
    fn promote_current(&mut self) {
        self.best_score = self.cache.total();
        self.best.clone_from(&self.current);
    }
}
