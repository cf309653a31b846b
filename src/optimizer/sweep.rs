use super::progress::ProgressSink;
use super::runner::{OptimizationOptions, Optimizer};
use crate::arrangement::{Arrangement, FixedSet};
use crate::error::{SeatError, SfResult};
use crate::scorer::Scorer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Upper bound on grid points, so a tiny step cannot queue millions of searches.
const MAX_GRID_POINTS: usize = 10_000;

/// Inclusive `{min, max, step}` range. A non-positive step or `min == max`
/// yields just `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub step: f64,
}

impl SweepRange {
    pub fn single(value: f64) -> Self {
        Self {
            min: value,
            max: value,
            step: 0.0,
        }
    }

    pub fn validate(&self, name: &str) -> SfResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || !self.step.is_finite() {
            return Err(SeatError::Config(format!(
                "{} range must be finite, got {:?}",
                name, self
            )));
        }
        if self.min > self.max {
            return Err(SeatError::Config(format!(
                "{} range has min {} above max {}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn values(&self) -> Vec<f64> {
        if self.step <= 0.0 || self.min == self.max {
            return vec![self.min];
        }
        // Index-based to avoid accumulating float error across many steps.
        let tolerance = self.step * 1e-9;
        let mut out = Vec::new();
        let mut k = 0usize;
        loop {
            let v = self.min + k as f64 * self.step;
            if v > self.max + tolerance || out.len() > MAX_GRID_POINTS {
                break;
            }
            out.push(v.min(self.max));
            k += 1;
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    pub initial_temperature: SweepRange,
    pub cooling_rate: SweepRange,
}

impl SweepGrid {
    /// `(initial_temperature, cooling_rate)` pairs, temperature-major.
    pub fn points(&self) -> SfResult<Vec<(f64, f64)>> {
        self.initial_temperature.validate("initial_temperature")?;
        self.cooling_rate.validate("cooling_rate")?;

        let temps = self.initial_temperature.values();
        let rates = self.cooling_rate.values();
        let count = temps.len().saturating_mul(rates.len());
        if count > MAX_GRID_POINTS {
            return Err(SeatError::Config(format!(
                "sweep grid has {} points, the limit is {}",
                count, MAX_GRID_POINTS
            )));
        }

        Ok(temps
            .iter()
            .flat_map(|&t| rates.iter().map(move |&c| (t, c)))
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepOutcome {
    pub score: f64,
    pub arrangement: Arrangement,
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    pub points: Vec<SweepPoint>,
}

/// Runs the optimizer once per grid point and keeps the best. Ties keep the
/// earliest point in grid order.
pub fn sweep<S: ProgressSink + ?Sized>(
    scorer: Arc<Scorer>,
    base: &OptimizationOptions,
    grid: &SweepGrid,
    initial: &Arrangement,
    fixed: &FixedSet,
    sink: &S,
) -> SfResult<SweepOutcome> {
    let points = grid.points()?;

    // Validate every combination before the first search starts.
    let mut plans = Vec::with_capacity(points.len());
    for &(temperature, cooling) in &points {
        let mut opts = *base;
        opts.schedule.initial_temperature = temperature;
        opts.schedule.cooling_rate = cooling;
        plans.push((temperature, cooling, Optimizer::new(scorer.clone(), opts)?));
    }
    info!("Sweeping {} parameter combinations", plans.len());

    let mut best: Option<SweepOutcome> = None;
    let mut evaluated = Vec::with_capacity(plans.len());

    for (temperature, cooling, optimizer) in plans {
        if sink.should_stop() {
            break;
        }
        let result = optimizer.run(initial, fixed, sink)?;
        debug!(
            "T0={} cooling={} -> {:.3}",
            temperature, cooling, result.score
        );
        evaluated.push(SweepPoint {
            initial_temperature: temperature,
            cooling_rate: cooling,
            score: result.score,
        });

        let better = best.as_ref().map_or(true, |b| result.score > b.score);
        if better {
            best = Some(SweepOutcome {
                score: result.score,
                arrangement: result.arrangement,
                initial_temperature: temperature,
                cooling_rate: cooling,
                points: Vec::new(),
            });
        }
    }

    let mut outcome = best.ok_or_else(|| {
        SeatError::Validation("sweep was cancelled before any combination ran".to_string())
    })?;
    outcome.points = evaluated;
    info!(
        "Best sweep score {:.3} at T0={} cooling={}",
        outcome.score, outcome.initial_temperature, outcome.cooling_rate
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_values() {
        let r = SweepRange {
            min: 100.0,
            max: 300.0,
            step: 100.0,
        };
        assert_eq!(r.values(), vec![100.0, 200.0, 300.0]);

        let r = SweepRange {
            min: 0.99,
            max: 0.999,
            step: 0.003,
        };
        let v = r.values();
        assert_eq!(v.len(), 4);
        assert!((v[3] - 0.999).abs() < 1e-12);
        assert!(v.iter().all(|&x| x <= 0.999));
    }

    #[test]
    fn degenerate_ranges() {
        assert_eq!(SweepRange::single(5.0).values(), vec![5.0]);
        let r = SweepRange {
            min: 1.0,
            max: 2.0,
            step: 0.0,
        };
        assert_eq!(r.values(), vec![1.0]);
        let r = SweepRange {
            min: 1.0,
            max: 2.0,
            step: -1.0,
        };
        assert_eq!(r.values(), vec![1.0]);
    }

    #[test]
    fn rejects_inverted_range() {
        let grid = SweepGrid {
            initial_temperature: SweepRange {
                min: 10.0,
                max: 1.0,
                step: 1.0,
            },
            cooling_rate: SweepRange::single(0.99),
        };
        assert!(matches!(grid.points(), Err(SeatError::Config(_))));
    }
}
