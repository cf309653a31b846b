use super::moves;
use super::progress::ProgressSink;
use super::replica::{Replica, RunOutcome, RunSummary};
use super::AnnealSchedule;
use crate::arrangement::{Arrangement, FixedSet, SeatCoord};
use crate::config::Config;
use crate::error::{SeatError, SfResult};
use crate::scorer::Scorer;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, Copy, PartialEq, TypedBuilder)]
pub struct OptimizationOptions {
    #[builder(default)]
    pub schedule: AnnealSchedule,
    #[builder(default = 1)]
    pub parallel_runs: usize,
    #[builder(default, setter(strip_option))]
    pub seed: Option<u64>,
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        OptimizationOptions::builder().build()
    }
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            schedule: cfg.schedule(),
            parallel_runs: cfg.search.parallel_runs,
            seed: cfg.search.seed,
        }
    }
}

impl OptimizationOptions {
    pub fn validate(&self) -> SfResult<()> {
        self.schedule.validate()?;
        if self.parallel_runs == 0 {
            return Err(SeatError::Config(
                "parallel_runs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub score: f64,
    pub arrangement: Arrangement,
    pub runs: Vec<RunSummary>,
    /// Index of the winning run, `None` when nothing could be moved.
    pub best_run: Option<usize>,
}

pub struct Optimizer {
    scorer: Arc<Scorer>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, options: OptimizationOptions) -> SfResult<Self> {
        options.validate()?;
        Ok(Self { scorer, options })
    }

    pub fn scorer(&self) -> &Arc<Scorer> {
        &self.scorer
    }

    pub fn options(&self) -> &OptimizationOptions {
        &self.options
    }

    /// Runs `parallel_runs` independent searches from `initial` and returns
    /// the best. The caller's arrangement is never modified.
    pub fn run<S: ProgressSink + ?Sized>(
        &self,
        initial: &Arrangement,
        fixed: &FixedSet,
        sink: &S,
    ) -> SfResult<OptimizationResult> {
        let bonus = self.scorer.bonus_config();
        initial.validate(bonus)?;
        fixed.validate_against(initial, bonus)?;

        for (coord, id) in initial.occupied(bonus) {
            if !self.scorer.registry().contains(id) {
                warn!("'{}' at {} is not in the registry and scores zero", id, coord);
            }
        }

        let free: Arc<[SeatCoord]> = moves::free_coordinates(initial, fixed, bonus).into();
        if free.len() < 2 {
            info!(
                "Only {} free seat(s), returning the arrangement unchanged",
                free.len()
            );
            return Ok(OptimizationResult {
                score: self.scorer.score(initial),
                arrangement: initial.clone(),
                runs: Vec::new(),
                best_run: None,
            });
        }

        let opts = &self.options;
        info!(
            "Optimizing {} free seats: {} runs x {} iterations (T0={}, cooling={})",
            free.len(),
            opts.parallel_runs,
            opts.schedule.iterations,
            opts.schedule.initial_temperature,
            opts.schedule.cooling_rate
        );
        let start = Instant::now();

        let outcomes: Vec<RunOutcome> = (0..opts.parallel_runs)
            .into_par_iter()
            .map(|run_id| {
                let run_seed = opts.seed.map(|s| s.wrapping_add(run_id as u64));
                Replica::new(
                    self.scorer.clone(),
                    free.clone(),
                    initial.clone(),
                    opts.schedule,
                    run_id,
                    run_seed,
                )
                .solve(sink)
            })
            .collect();

        // Strict comparison keeps the lowest run index on ties.
        let mut best_idx = 0;
        for (i, outcome) in outcomes.iter().enumerate().skip(1) {
            if outcome.summary.best_score > outcomes[best_idx].summary.best_score {
                best_idx = i;
            }
        }

        let runs: Vec<RunSummary> = outcomes.iter().map(|o| o.summary.clone()).collect();
        let Some(winner) = outcomes.into_iter().nth(best_idx) else {
            return Err(SeatError::Validation("no run produced a result".to_string()));
        };

        info!(
            "Best score {:.3} from run {} in {:.2?}",
            winner.summary.best_score,
            best_idx,
            start.elapsed()
        );

        Ok(OptimizationResult {
            score: winner.summary.best_score,
            arrangement: winner.arrangement,
            runs,
            best_run: Some(best_idx),
        })
    }
}
