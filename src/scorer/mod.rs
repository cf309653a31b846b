pub mod engine;
pub mod satisfaction;
pub mod types;

pub use self::types::ScoreDetails;
use crate::arrangement::{Arrangement, BonusConfig, Table};
use crate::consts::GAP_PENALTY_PER_GAP;
use crate::error::{SeatError, SfResult};
use crate::registry::PreferenceRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::{Display, EnumString};

/// How the bonus multiplier combines with a seat's weighted fulfillment.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BonusPolicy {
    /// `seat *= bonus_multiplier`
    #[default]
    Multiplicative,
    /// `seat += bonus_multiplier`
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreParams {
    pub bonus_multiplier: f64,
    pub bonus_config: BonusConfig,
    pub gap_penalty_per_gap: f64,
    pub bonus_policy: BonusPolicy,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            bonus_multiplier: 1.0,
            bonus_config: BonusConfig::None,
            gap_penalty_per_gap: GAP_PENALTY_PER_GAP,
            bonus_policy: BonusPolicy::Multiplicative,
        }
    }
}

impl ScoreParams {
    pub fn validate(&self) -> SfResult<()> {
        if !self.bonus_multiplier.is_finite() {
            return Err(SeatError::Config(format!(
                "bonus_multiplier must be finite, got {}",
                self.bonus_multiplier
            )));
        }
        if !self.gap_penalty_per_gap.is_finite() || self.gap_penalty_per_gap < 0.0 {
            return Err(SeatError::Config(format!(
                "gap_penalty_per_gap must be a non-negative number, got {}",
                self.gap_penalty_per_gap
            )));
        }
        Ok(())
    }
}

/// Fitness function over arrangements. Cheap to clone; the registry is shared.
#[derive(Debug, Clone)]
pub struct Scorer {
    registry: Arc<PreferenceRegistry>,
    params: ScoreParams,
}

impl Scorer {
    pub fn new(registry: Arc<PreferenceRegistry>, params: ScoreParams) -> SfResult<Self> {
        params.validate()?;
        Ok(Self { registry, params })
    }

    pub fn registry(&self) -> &PreferenceRegistry {
        &self.registry
    }

    pub fn params(&self) -> &ScoreParams {
        &self.params
    }

    pub fn bonus_config(&self) -> BonusConfig {
        self.params.bonus_config
    }

    /// Total fitness. Higher is better.
    pub fn score(&self, arrangement: &Arrangement) -> f64 {
        engine::score(self, arrangement)
    }

    /// Fitness contribution of a single table, gap penalty included.
    pub fn score_table(&self, table: &Table) -> f64 {
        engine::score_table(self, table)
    }

    pub fn score_details(&self, arrangement: &Arrangement) -> ScoreDetails {
        engine::score_details(self, arrangement)
    }

    /// True when every seated person with preferences has at least one of them as a neighbor.
    pub fn is_perfect(&self, arrangement: &Arrangement) -> bool {
        satisfaction::is_perfect_seating(arrangement, &self.registry, self.params.bonus_config)
    }
}
