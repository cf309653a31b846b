pub mod optimize;
pub mod request;
pub mod stats;
pub mod sweep;

use clap::Args;
use seatforge::arrangement::fill::populate_free_seats;
use seatforge::arrangement::{Arrangement, FixedSet};
use seatforge::config::Config;
use seatforge::error::{SeatError, SfResult};
use seatforge::optimizer::{Phase, ProgressSink, ProgressUpdate};
use seatforge::registry::loader::load_registry_file;
use seatforge::registry::PreferenceRegistry;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Roster as CSV (name, preferences, weight) or JSON registry
    #[arg(short, long)]
    pub roster: PathBuf,

    /// Arrangement JSON whose occupied seats are pinned
    #[arg(short, long)]
    pub pins: Option<PathBuf>,

    /// Write the result as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Everything a search needs, built from the command line inputs.
pub struct Prepared {
    pub registry: Arc<PreferenceRegistry>,
    pub arrangement: Arrangement,
    pub fixed: FixedSet,
}

pub fn read_arrangement(path: &Path) -> SfResult<Arrangement> {
    let file = File::open(path).map_err(|e| {
        SeatError::Config(format!(
            "Could not open arrangement '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> SfResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Loads the roster, lays out the tables (taking pins into account), pins
/// the manual seats and fills the rest at random.
pub fn prepare(input: &InputArgs, config: &Config) -> SfResult<Prepared> {
    let registry = load_registry_file(&input.roster)?;
    info!("Loaded {} people from {}", registry.len(), input.roster.display());

    let bonus = config.scoring.bonus_config;
    let layout = config.table_layout()?;

    let mut arrangement = match &input.pins {
        Some(path) => {
            let pinned = read_arrangement(path)?;
            pinned.validate(bonus)?;
            if pinned.tables.len() != config.layout.tables || pinned.layout(bonus) != layout {
                return Err(SeatError::Config(format!(
                    "Pinned arrangement has {} tables of {} seats, expected {} tables of {}",
                    pinned.tables.len(),
                    pinned.layout(bonus).seats_per_table(),
                    config.layout.tables,
                    layout.seats_per_table()
                )));
            }
            pinned
        }
        None => Arrangement::empty(config.layout.tables, layout),
    };

    let fixed = FixedSet::from_occupied(&arrangement, bonus);
    info!("{} seats pinned", fixed.len());

    let mut rng = match config.search.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    populate_free_seats(&mut arrangement, &registry, bonus, &mut rng);

    Ok(Prepared {
        registry: Arc::new(registry),
        arrangement,
        fixed,
    })
}

/// Logs one line per tenth of the annealing schedule, across all runs.
/// Refinement passes only show up at debug level.
#[derive(Default)]
pub struct CliProgress {
    last_decile: AtomicUsize,
}

impl ProgressSink for CliProgress {
    fn on_progress(&self, update: &ProgressUpdate) {
        if update.phase == Phase::Refining {
            debug!(
                "run {} | refining | best {:.3}",
                update.run_id, update.best_score
            );
            return;
        }
        if update.total_iterations == 0 {
            return;
        }
        let decile = update.iteration * 10 / update.total_iterations;
        if self.last_decile.fetch_max(decile, Ordering::Relaxed) < decile {
            info!(
                "{:3}% | run {} | best {:.3} | T={:.4}",
                decile * 10,
                update.run_id,
                update.best_score,
                update.temperature
            );
        }
    }
}
