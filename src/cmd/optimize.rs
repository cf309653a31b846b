use super::{prepare, write_json, CliProgress, InputArgs};
use crate::reports;
use clap::Args;
use seatforge::api::SearchResponse;
use seatforge::config::Config;
use seatforge::error::SfResult;
use seatforge::optimizer::{OptimizationOptions, Optimizer};
use seatforge::scorer::Scorer;
use seatforge::stats;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub config: Config,
}

pub fn run(args: &OptimizeArgs, config: Config) -> SfResult<()> {
    let job = prepare(&args.input, &config)?;
    let scorer = Arc::new(Scorer::new(job.registry.clone(), config.score_params())?);

    let initial_score = scorer.score(&job.arrangement);
    info!("Initial score: {:.3}", initial_score);

    let optimizer = Optimizer::new(scorer.clone(), OptimizationOptions::from(&config))?;
    let result = optimizer.run(&job.arrangement, &job.fixed, &CliProgress::default())?;

    info!("=== FINAL RESULT ===");
    info!("Score: {:.3} (from {:.3})", result.score, initial_score);

    let bonus = scorer.bonus_config();
    let details = scorer.score_details(&result.arrangement);
    let report = stats::report(&result.arrangement, scorer.registry(), bonus);

    reports::print_arrangement(&result.arrangement, bonus);
    reports::print_score(&details);
    reports::print_runs(&result.runs, result.best_run);
    reports::print_statistics(&report);

    if let Some(path) = &args.input.output {
        let response = SearchResponse {
            arrangement: result.arrangement,
            best_score: result.score,
            details,
            statistics: report,
            runs: result.runs,
        };
        write_json(path, &response)?;
    }
    Ok(())
}
