use super::{read_arrangement, write_json};
use crate::reports;
use clap::Args;
use seatforge::config::Config;
use seatforge::error::SfResult;
use seatforge::registry::loader::load_registry_file;
use seatforge::scorer::Scorer;
use seatforge::stats;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[arg(short, long)]
    pub roster: PathBuf,

    /// Arrangement JSON to evaluate
    #[arg(short, long)]
    pub arrangement: PathBuf,

    /// Write the statistics report as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub config: Config,
}

pub fn run(args: &StatsArgs, config: Config) -> SfResult<()> {
    let registry = Arc::new(load_registry_file(&args.roster)?);
    let arrangement = read_arrangement(&args.arrangement)?;
    let bonus = config.scoring.bonus_config;
    arrangement.validate(bonus)?;

    let scorer = Scorer::new(registry.clone(), config.score_params())?;
    let details = scorer.score_details(&arrangement);
    let report = stats::report(&arrangement, &registry, bonus);

    reports::print_arrangement(&arrangement, bonus);
    reports::print_score(&details);
    reports::print_statistics(&report);
    println!(
        "Perfect seating: {}",
        if scorer.is_perfect(&arrangement) { "yes" } else { "no" }
    );

    if let Some(path) = &args.output {
        write_json(path, &report)?;
    }
    Ok(())
}
