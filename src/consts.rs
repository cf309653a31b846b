/// Penalty subtracted for every empty seat sandwiched inside an occupied row block.
pub const GAP_PENALTY_PER_GAP: f64 = 100.0;

/// Contribution of a same-row neighbor or the seat directly across.
pub const WEIGHT_DIRECT: f64 = 1.0;

/// Contribution of a diagonal-across neighbor.
pub const WEIGHT_DIAGONAL: f64 = 0.8;

/// Lower bound for the annealing temperature so `exp(delta / T)` stays defined.
pub const TEMPERATURE_FLOOR: f64 = 1e-8;

/// How often (in iterations) a run pushes a progress update to its sink.
pub const REPORT_INTERVAL: usize = 1_024;

/// How often (in iterations) a run writes a debug trace line.
pub const TRACE_INTERVAL: usize = 100_000;

/// Default person weight when the roster leaves it blank.
pub const DEFAULT_WEIGHT: f64 = 1.0;
