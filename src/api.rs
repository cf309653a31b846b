use crate::arrangement::{Arrangement, BonusConfig, FixedSet};
use crate::consts::GAP_PENALTY_PER_GAP;
use crate::error::{SeatError, SfResult};
use crate::optimizer::{
    sweep, AnnealSchedule, OptimizationOptions, Optimizer, ProgressSink, ProgressStatus,
    ProgressTracker, RunSummary, SweepGrid, SweepPoint, SweepRange,
};
use crate::registry::PreferenceRegistry;
use crate::scorer::{BonusPolicy, ScoreDetails, ScoreParams, Scorer};
use crate::stats::{self, SeatingReport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{error, info};

fn default_bonus_multiplier() -> f64 {
    1.0
}

fn default_gap_penalty() -> f64 {
    GAP_PENALTY_PER_GAP
}

fn default_parallel_runs() -> usize {
    6
}

fn default_true() -> bool {
    true
}

/// Scoring knobs shared by every request type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    #[serde(default = "default_bonus_multiplier")]
    pub bonus_multiplier: f64,
    #[serde(default)]
    pub bonus_config: BonusConfig,
    #[serde(default)]
    pub bonus_policy: BonusPolicy,
    #[serde(default = "default_gap_penalty")]
    pub gap_penalty_per_gap: f64,
}

impl Default for ScoringRequest {
    fn default() -> Self {
        Self {
            bonus_multiplier: default_bonus_multiplier(),
            bonus_config: BonusConfig::None,
            bonus_policy: BonusPolicy::Multiplicative,
            gap_penalty_per_gap: default_gap_penalty(),
        }
    }
}

impl From<&ScoringRequest> for ScoreParams {
    fn from(r: &ScoringRequest) -> Self {
        ScoreParams {
            bonus_multiplier: r.bonus_multiplier,
            bonus_config: r.bonus_config,
            gap_penalty_per_gap: r.gap_penalty_per_gap,
            bonus_policy: r.bonus_policy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub arrangement: Arrangement,
    #[serde(default)]
    pub fixed: FixedSet,
    pub people: PreferenceRegistry,
    #[serde(flatten)]
    pub scoring: ScoringRequest,
    #[serde(flatten)]
    pub schedule: AnnealSchedule,
    #[serde(default = "default_parallel_runs")]
    pub parallel_runs: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub arrangement: Arrangement,
    pub best_score: f64,
    pub details: ScoreDetails,
    pub statistics: SeatingReport,
    pub runs: Vec<RunSummary>,
}

impl SearchRequest {
    pub fn options(&self) -> OptimizationOptions {
        OptimizationOptions {
            schedule: self.schedule,
            parallel_runs: self.parallel_runs,
            seed: self.seed,
        }
    }

    pub fn scorer(&self) -> SfResult<Arc<Scorer>> {
        build_scorer(&self.people, &self.scoring)
    }
}

fn build_scorer(people: &PreferenceRegistry, scoring: &ScoringRequest) -> SfResult<Arc<Scorer>> {
    Ok(Arc::new(Scorer::new(
        Arc::new(people.clone()),
        ScoreParams::from(scoring),
    )?))
}

/// Optimizes the request's arrangement and attaches score details and statistics.
pub fn run_search<S: ProgressSink + ?Sized>(
    req: &SearchRequest,
    sink: &S,
) -> SfResult<SearchResponse> {
    let scorer = req.scorer()?;
    let optimizer = Optimizer::new(scorer.clone(), req.options())?;
    let result = optimizer.run(&req.arrangement, &req.fixed, sink)?;

    Ok(SearchResponse {
        details: scorer.score_details(&result.arrangement),
        statistics: stats::report(
            &result.arrangement,
            scorer.registry(),
            scorer.bonus_config(),
        ),
        best_score: result.score,
        arrangement: result.arrangement,
        runs: result.runs,
    })
}

/// JSON in, JSON out.
pub fn optimize_json(input: &str) -> SfResult<String> {
    let req: SearchRequest = serde_json::from_str(input)?;
    let resp = run_search(&req, &crate::optimizer::NoProgress)?;
    Ok(serde_json::to_string(&resp)?)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRequest {
    pub arrangement: Arrangement,
    #[serde(default)]
    pub fixed: FixedSet,
    pub people: PreferenceRegistry,
    #[serde(flatten)]
    pub scoring: ScoringRequest,
    pub initial_temperature: SweepRange,
    pub cooling_rate: SweepRange,
    #[serde(default = "default_sweep_iterations")]
    pub iterations: usize,
    #[serde(default = "default_true")]
    pub early_stop: bool,
    #[serde(default = "default_parallel_runs")]
    pub parallel_runs: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_sweep_iterations() -> usize {
    500_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResponse {
    pub arrangement: Arrangement,
    pub best_score: f64,
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    pub statistics: SeatingReport,
    pub points: Vec<SweepPoint>,
}

pub fn run_sweep<S: ProgressSink + ?Sized>(
    req: &SweepRequest,
    sink: &S,
) -> SfResult<SweepResponse> {
    let scorer = build_scorer(&req.people, &req.scoring)?;
    let base = OptimizationOptions {
        schedule: AnnealSchedule {
            iterations: req.iterations,
            early_stop: req.early_stop,
            ..AnnealSchedule::default()
        },
        parallel_runs: req.parallel_runs,
        seed: req.seed,
    };
    let grid = SweepGrid {
        initial_temperature: req.initial_temperature,
        cooling_rate: req.cooling_rate,
    };

    let outcome = sweep(scorer.clone(), &base, &grid, &req.arrangement, &req.fixed, sink)?;

    Ok(SweepResponse {
        statistics: stats::report(
            &outcome.arrangement,
            scorer.registry(),
            scorer.bonus_config(),
        ),
        best_score: outcome.score,
        initial_temperature: outcome.initial_temperature,
        cooling_rate: outcome.cooling_rate,
        arrangement: outcome.arrangement,
        points: outcome.points,
    })
}

pub fn sweep_json(input: &str) -> SfResult<String> {
    let req: SweepRequest = serde_json::from_str(input)?;
    let resp = run_sweep(&req, &crate::optimizer::NoProgress)?;
    Ok(serde_json::to_string(&resp)?)
}

/// A search running on a background thread.
pub struct SearchHandle {
    tracker: Arc<ProgressTracker>,
    thread: JoinHandle<SfResult<SearchResponse>>,
}

/// Starts `req` on its own thread and returns immediately.
pub fn spawn_search(req: SearchRequest) -> SearchHandle {
    let tracker = Arc::new(ProgressTracker::new(req.schedule.iterations));
    let worker_tracker = tracker.clone();

    let thread = std::thread::spawn(move || {
        let result = run_search(&req, worker_tracker.as_ref());
        match &result {
            Ok(resp) => {
                worker_tracker.record_best(resp.best_score);
                worker_tracker.finish(serde_json::to_value(resp).ok());
                info!("Background search finished with score {:.3}", resp.best_score);
            }
            Err(e) => {
                error!("Background search failed: {}", e);
                worker_tracker.finish(None);
            }
        }
        result
    });

    SearchHandle { tracker, thread }
}

impl SearchHandle {
    pub fn status(&self) -> ProgressStatus {
        self.tracker.status()
    }

    /// Asks the search to stop. It still returns the best found so far.
    pub fn cancel(&self) {
        self.tracker.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.tracker.is_finished()
    }

    pub fn join(self) -> SfResult<SearchResponse> {
        self.thread
            .join()
            .map_err(|_| SeatError::Validation("search thread panicked".to_string()))?
    }
}
