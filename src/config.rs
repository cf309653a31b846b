use crate::arrangement::{BonusConfig, TableLayout};
use crate::consts::GAP_PENALTY_PER_GAP;
use crate::error::{SeatError, SfResult};
use crate::optimizer::AnnealSchedule;
use crate::scorer::{BonusPolicy, ScoreParams};
use clap::{parser::ValueSource, ArgAction, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub scoring: ScoringParams,
    #[command(flatten)]
    pub layout: LayoutParams,
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 1_300_000)]
    pub iterations: usize,
    #[arg(long, default_value_t = 1200.0)]
    pub initial_temperature: f64,
    #[arg(long, default_value_t = 0.999991)]
    pub cooling_rate: f64,
    /// Stop annealing once everyone with preferences sits next to one of them
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub early_stop: bool,
    #[arg(long, default_value_t = 6)]
    pub parallel_runs: usize,
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            iterations: 1_300_000,
            initial_temperature: 1200.0,
            cooling_rate: 0.999991,
            early_stop: true,
            parallel_runs: 6,
            seed: None,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    #[arg(long, default_value_t = 1.0)]
    pub bonus_multiplier: f64,
    #[arg(long, value_enum, default_value_t = BonusConfig::None)]
    pub bonus_config: BonusConfig,
    #[arg(long, value_enum, default_value_t = BonusPolicy::Multiplicative)]
    pub bonus_policy: BonusPolicy,
    #[arg(long, default_value_t = GAP_PENALTY_PER_GAP)]
    pub gap_penalty: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            bonus_multiplier: 1.0,
            bonus_config: BonusConfig::None,
            bonus_policy: BonusPolicy::Multiplicative,
            gap_penalty: GAP_PENALTY_PER_GAP,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    #[arg(long, default_value_t = 4)]
    pub tables: usize,
    /// Seats per table, bonus seats included
    #[arg(long, default_value_t = 8)]
    pub seats_per_table: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            tables: 4,
            seats_per_table: 8,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SeatError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites file values with flags the user typed explicitly.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(search.iterations);
        update_if_present!(search.initial_temperature);
        update_if_present!(search.cooling_rate);
        update_if_present!(search.early_stop);
        update_if_present!(search.parallel_runs);
        update_if_present!(search.seed);

        update_if_present!(scoring.bonus_multiplier);
        update_if_present!(scoring.bonus_config);
        update_if_present!(scoring.bonus_policy);
        update_if_present!(scoring.gap_penalty);

        update_if_present!(layout.tables);
        update_if_present!(layout.seats_per_table);
    }

    pub fn score_params(&self) -> ScoreParams {
        ScoreParams {
            bonus_multiplier: self.scoring.bonus_multiplier,
            bonus_config: self.scoring.bonus_config,
            gap_penalty_per_gap: self.scoring.gap_penalty,
            bonus_policy: self.scoring.bonus_policy,
        }
    }

    pub fn schedule(&self) -> AnnealSchedule {
        AnnealSchedule::from(&self.search)
    }

    pub fn table_layout(&self) -> SfResult<TableLayout> {
        TableLayout::from_seats(self.layout.seats_per_table, self.scoring.bonus_config)
    }

    /// Checks every numeric knob before any work starts.
    pub fn validate(&self) -> SfResult<()> {
        self.schedule().validate()?;
        self.score_params().validate()?;
        if self.search.parallel_runs == 0 {
            return Err(SeatError::Config(
                "parallel_runs must be at least 1".to_string(),
            ));
        }
        self.table_layout()?;
        Ok(())
    }
}

impl From<&SearchParams> for AnnealSchedule {
    fn from(p: &SearchParams) -> Self {
        AnnealSchedule {
            iterations: p.iterations,
            initial_temperature: p.initial_temperature,
            cooling_rate: p.cooling_rate,
            early_stop: p.early_stop,
        }
    }
}
