use super::delta::TableCache;
use super::Replica;
use crate::optimizer::progress::{ProgressSink, ProgressUpdate};
use itertools::Itertools;
use tracing::debug;

impl Replica {
    /// First-improvement pairwise descent on the best arrangement. Sweeps all
    /// free pairs until a full pass changes nothing.
    pub(crate) fn refine<S: ProgressSink + ?Sized>(&mut self, sink: &S) {
        self.current.clone_from(&self.best);
        self.cache = TableCache::build(&self.scorer, &self.current);

        let n = self.free.len();
        loop {
            if sink.should_stop() {
                break;
            }

            let mut improved = false;
            for (i, j) in (0..n).tuple_combinations() {
                let (a, b) = (self.free[i], self.free[j]);
                self.current.swap(&a, &b);
                let trial = self
                    .cache
                    .try_swap(&self.scorer, &self.current, &a, &b);

                if trial.total > self.cache.total() {
                    self.cache.commit(trial);
                    self.refine_improvements += 1;
                    improved = true;
                } else {
                    self.current.swap(&a, &b);
                }
            }
            self.refine_passes += 1;
            sink.on_progress(&ProgressUpdate {
                run_id: self.run_id,
                phase: self.phase,
                iteration: self.iterations,
                total_iterations: self.schedule.iterations,
                best_score: self.cache.total().max(self.best_score),
                temperature: self.temperature,
            });

            if !improved {
                break;
            }
        }

        if self.cache.total() > self.best_score {
            self.promote_current();
        }
        debug!(
            "Run {}: refinement {} passes, {} improvements, best {:.3}",
            self.run_id, self.refine_passes, self.refine_improvements, self.best_score
        );
    }
}
