use super::{prepare, write_json, CliProgress, InputArgs};
use crate::reports;
use clap::Args;
use seatforge::api::SweepResponse;
use seatforge::config::Config;
use seatforge::error::SfResult;
use seatforge::optimizer::{sweep, OptimizationOptions, SweepGrid, SweepRange};
use seatforge::scorer::Scorer;
use seatforge::stats;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub config: Config,

    #[arg(long)]
    pub temp_min: Option<f64>,
    #[arg(long)]
    pub temp_max: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    pub temp_step: f64,

    #[arg(long)]
    pub cooling_min: Option<f64>,
    #[arg(long)]
    pub cooling_max: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    pub cooling_step: f64,
}

/// Missing bounds fall back to the configured single value.
fn range(min: Option<f64>, max: Option<f64>, step: f64, fallback: f64) -> SweepRange {
    let min = min.unwrap_or(fallback);
    SweepRange {
        min,
        max: max.unwrap_or(min),
        step,
    }
}

impl SweepArgs {
    pub fn grid(&self, config: &Config) -> SweepGrid {
        SweepGrid {
            initial_temperature: range(
                self.temp_min,
                self.temp_max,
                self.temp_step,
                config.search.initial_temperature,
            ),
            cooling_rate: range(
                self.cooling_min,
                self.cooling_max,
                self.cooling_step,
                config.search.cooling_rate,
            ),
        }
    }
}

pub fn run(args: &SweepArgs, config: Config) -> SfResult<()> {
    let job = prepare(&args.input, &config)?;
    let scorer = Arc::new(Scorer::new(job.registry.clone(), config.score_params())?);

    let grid = args.grid(&config);
    let outcome = sweep(
        scorer.clone(),
        &OptimizationOptions::from(&config),
        &grid,
        &job.arrangement,
        &job.fixed,
        &CliProgress::default(),
    )?;

    info!("=== SWEEP RESULT ===");
    info!(
        "Score: {:.3} with initial temperature {} and cooling rate {}",
        outcome.score, outcome.initial_temperature, outcome.cooling_rate
    );

    let bonus = scorer.bonus_config();
    let report = stats::report(&outcome.arrangement, scorer.registry(), bonus);

    reports::print_sweep(&outcome.points);
    reports::print_arrangement(&outcome.arrangement, bonus);
    reports::print_statistics(&report);

    if let Some(path) = &args.input.output {
        let response = SweepResponse {
            arrangement: outcome.arrangement,
            best_score: outcome.score,
            initial_temperature: outcome.initial_temperature,
            cooling_rate: outcome.cooling_rate,
            statistics: report,
            points: outcome.points,
        };
        write_json(path, &response)?;
    }
    Ok(())
}
