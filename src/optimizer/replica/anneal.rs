use super::{AnnealExit, Replica};
use crate::consts::{REPORT_INTERVAL, TEMPERATURE_FLOOR, TRACE_INTERVAL};
use crate::optimizer::moves;
use crate::optimizer::progress::{ProgressSink, ProgressUpdate};
use tracing::debug;

impl Replica {
    /// Metropolis acceptance: improvements always pass, a loss of `delta`
    /// passes with probability `exp(delta / T)`.
    #[inline(always)]
    fn accepts(&mut self, delta: f64) -> bool {
        delta >= 0.0 || self.rng.f64() < (delta / self.temperature).exp()
    }

    pub(crate) fn anneal<S: ProgressSink + ?Sized>(&mut self, sink: &S) -> AnnealExit {
        let total = self.schedule.iterations;

        for step in 1..=total {
            if sink.should_stop() {
                debug!("Run {}: cancelled after {} iterations", self.run_id, self.iterations);
                return AnnealExit::Cancelled;
            }

            let Some((a, b)) = moves::propose_swap(&self.free, &mut self.rng) else {
                return AnnealExit::Completed;
            };

            self.current.swap(&a, &b);
            let trial = self
                .cache
                .try_swap(&self.scorer, &self.current, &a, &b);
            let delta = trial.total - self.cache.total();
            self.iterations += 1;

            if self.accepts(delta) {
                self.cache.commit(trial);
                self.accepted += 1;

                if self.cache.total() > self.best_score {
                    self.promote_current();
                    if self.schedule.early_stop && self.scorer.is_perfect(&self.best) {
                        debug!(
                            "Run {}: perfect seating after {} iterations",
                            self.run_id, self.iterations
                        );
                        return AnnealExit::Perfect;
                    }
                }
            } else {
                self.current.swap(&a, &b);
            }

            self.temperature = (self.temperature * self.schedule.cooling_rate).max(TEMPERATURE_FLOOR);

            if step % REPORT_INTERVAL == 0 {
                sink.on_progress(&ProgressUpdate {
                    run_id: self.run_id,
                    phase: self.phase,
                    iteration: step,
                    total_iterations: total,
                    best_score: self.best_score,
                    temperature: self.temperature,
                });
            }
            if step % TRACE_INTERVAL == 0 {
                debug!(
                    "Run {}: iter {}/{} T={:.6} current={:.3} best={:.3}",
                    self.run_id,
                    step,
                    total,
                    self.temperature,
                    self.cache.total(),
                    self.best_score
                );
            }
        }

        AnnealExit::Completed
    }
}
