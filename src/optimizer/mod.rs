pub mod moves;
pub mod progress;
pub mod replica;
pub mod runner;
pub mod sweep;

pub use self::progress::{NoProgress, ProgressSink, ProgressStatus, ProgressTracker, ProgressUpdate};
pub use self::replica::{Phase, Replica, RunOutcome, RunSummary};
pub use self::runner::{OptimizationOptions, OptimizationResult, Optimizer};
pub use self::sweep::{sweep, SweepGrid, SweepOutcome, SweepPoint, SweepRange};

use crate::error::{SeatError, SfResult};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Annealing knobs for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(default)]
pub struct AnnealSchedule {
    #[builder(default = 1_300_000)]
    pub iterations: usize,
    #[builder(default = 1200.0)]
    pub initial_temperature: f64,
    #[builder(default = 0.999991)]
    pub cooling_rate: f64,
    #[builder(default = true)]
    pub early_stop: bool,
}

impl Default for AnnealSchedule {
    fn default() -> Self {
        AnnealSchedule::builder().build()
    }
}

impl AnnealSchedule {
    pub fn validate(&self) -> SfResult<()> {
        if self.iterations == 0 {
            return Err(SeatError::Config(
                "iterations must be greater than 0".to_string(),
            ));
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(SeatError::Config(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(SeatError::Config(format!(
                "cooling_rate must lie in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }
}
