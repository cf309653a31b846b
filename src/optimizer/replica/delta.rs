use crate::arrangement::{Arrangement, SeatCoord};
use crate::scorer::engine::sum_in_order;
use crate::scorer::Scorer;

/// Per-table scores of the current arrangement.
///
/// `total` is always re-summed in table order, never patched with a delta,
/// so it matches `Scorer::score` exactly.
#[derive(Debug, Clone)]
pub struct TableCache {
    scores: Vec<f64>,
    total: f64,
}

/// Rescored tables for a swap that has been applied but not yet committed.
#[derive(Debug, Clone, Copy)]
pub struct SwapOutcome {
    first: (usize, f64),
    second: Option<(usize, f64)>,
    pub total: f64,
}

impl TableCache {
    pub fn build(scorer: &Scorer, arrangement: &Arrangement) -> Self {
        let scores: Vec<f64> = arrangement
            .tables
            .iter()
            .map(|t| scorer.score_table(t))
            .collect();
        let total = sum_in_order(scores.iter().copied());
        Self { scores, total }
    }

    #[inline(always)]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Scores the tables touched by a swap of `a` and `b`. The swap must
    /// already be applied to `arrangement`.
    #[inline]
    pub fn try_swap(
        &self,
        scorer: &Scorer,
        arrangement: &Arrangement,
        a: &SeatCoord,
        b: &SeatCoord,
    ) -> SwapOutcome {
        let first = (a.table, scorer.score_table(&arrangement.tables[a.table]));
        let second = (b.table != a.table)
            .then(|| (b.table, scorer.score_table(&arrangement.tables[b.table])));

        let total = sum_in_order(self.scores.iter().enumerate().map(|(i, &s)| {
            if i == first.0 {
                first.1
            } else {
                match second {
                    Some((t, score)) if t == i => score,
                    _ => s,
                }
            }
        }));

        SwapOutcome {
            first,
            second,
            total,
        }
    }

    #[inline]
    pub fn commit(&mut self, trial: SwapOutcome) {
        self.scores[trial.first.0] = trial.first.1;
        if let Some((t, score)) = trial.second {
            self.scores[t] = score;
        }
        self.total = trial.total;
    }
}
