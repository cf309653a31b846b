use super::replica::Phase;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// Snapshot pushed by a run every `REPORT_INTERVAL` annealing iterations
/// and after every refinement pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressUpdate {
    pub run_id: usize,
    pub phase: Phase,
    pub iteration: usize,
    pub total_iterations: usize,
    pub best_score: f64,
    pub temperature: f64,
}

/// Side channel between running searches and whoever watches them.
///
/// Shared by all parallel runs, so implementations must be thread safe.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, update: &ProgressUpdate);

    /// Polled once per iteration. Returning true ends annealing early.
    fn should_stop(&self) -> bool {
        false
    }
}

/// Sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    #[inline(always)]
    fn on_progress(&self, _update: &ProgressUpdate) {}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStatus {
    pub iteration: usize,
    pub total_iterations: usize,
    pub elapsed_ms: u64,
    pub best_score: Option<f64>,
    pub finished: bool,
    pub cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_result: Option<serde_json::Value>,
}

/// Pollable status of a search in flight.
pub struct ProgressTracker {
    started: Instant,
    iteration: AtomicUsize,
    total_iterations: AtomicUsize,
    best_bits: AtomicU64,
    finished: AtomicBool,
    cancelled: AtomicBool,
    final_result: Mutex<Option<serde_json::Value>>,
}

impl ProgressTracker {
    pub fn new(total_iterations: usize) -> Self {
        Self {
            started: Instant::now(),
            iteration: AtomicUsize::new(0),
            total_iterations: AtomicUsize::new(total_iterations),
            best_bits: AtomicU64::new(f64::NEG_INFINITY.to_bits()),
            finished: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            final_result: Mutex::new(None),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    pub fn best_score(&self) -> Option<f64> {
        let best = f64::from_bits(self.best_bits.load(Ordering::Relaxed));
        best.is_finite().then_some(best)
    }

    pub fn record_best(&self, score: f64) {
        let _ = self
            .best_bits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                (score > f64::from_bits(bits)).then_some(score.to_bits())
            });
    }

    /// Stores the serialized outcome and marks the search finished.
    pub fn finish(&self, result: Option<serde_json::Value>) {
        let mut slot = self
            .final_result
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = result;
        self.finished.store(true, Ordering::Release);
    }

    pub fn status(&self) -> ProgressStatus {
        let final_result = self
            .final_result
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        ProgressStatus {
            iteration: self.iteration.load(Ordering::Relaxed),
            total_iterations: self.total_iterations.load(Ordering::Relaxed),
            elapsed_ms: self.started.elapsed().as_millis() as u64,
            best_score: self.best_score(),
            finished: self.is_finished(),
            cancelled: self.is_cancelled(),
            final_result,
        }
    }
}

impl ProgressSink for ProgressTracker {
    fn on_progress(&self, update: &ProgressUpdate) {
        self.iteration.fetch_max(update.iteration, Ordering::Relaxed);
        self.total_iterations
            .store(update.total_iterations, Ordering::Relaxed);
        self.record_best(update.best_score);
    }

    fn should_stop(&self) -> bool {
        self.is_cancelled()
    }
}
