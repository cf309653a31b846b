use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    // Top-line
    pub total: f64,
    pub preference_score: f64,

    // Contiguity
    pub gap_count: usize,
    pub gap_penalty: f64,

    pub occupied_seats: usize,
    /// Seated ids missing from the registry, sorted.
    pub unknown_ids: Vec<String>,
}
