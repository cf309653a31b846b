#![allow(dead_code)]

use seatforge::arrangement::{Arrangement, Seat, Table};
use seatforge::optimizer::{AnnealSchedule, OptimizationOptions};
use seatforge::registry::{Person, PreferenceRegistry};
use seatforge::scorer::{ScoreParams, Scorer};
use std::sync::Arc;

/// Builder for registries to keep test setup short.
#[derive(Default)]
pub struct RosterBuilder {
    people: Vec<Person>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person(self, id: &str, prefs: &[&str]) -> Self {
        self.weighted(id, prefs, 1.0)
    }

    pub fn weighted(mut self, id: &str, prefs: &[&str], weight: f64) -> Self {
        self.people.push(Person::new(
            id,
            prefs.iter().map(|p| p.to_string()).collect(),
            weight,
        ));
        self
    }

    pub fn build(self) -> PreferenceRegistry {
        PreferenceRegistry::new(self.people).unwrap()
    }

    pub fn arc(self) -> Arc<PreferenceRegistry> {
        Arc::new(self.build())
    }
}

/// `""` marks an empty seat.
pub fn row(ids: &[&str]) -> Vec<Seat> {
    ids.iter()
        .map(|s| (!s.is_empty()).then(|| s.to_string()))
        .collect()
}

pub fn table(top: &[&str], bottom: &[&str]) -> Table {
    Table {
        top: row(top),
        bottom: row(bottom),
        bonus_left: None,
        bonus_right: None,
    }
}

pub fn table_with_bonus(
    top: &[&str],
    bottom: &[&str],
    left: Option<&str>,
    right: Option<&str>,
) -> Table {
    let seat = |s: &str| (!s.is_empty()).then(|| s.to_string());
    Table {
        top: row(top),
        bottom: row(bottom),
        bonus_left: left.map(seat),
        bonus_right: right.map(seat),
    }
}

pub fn arrangement(tables: Vec<Table>) -> Arrangement {
    Arrangement { tables }
}

pub fn scorer(registry: Arc<PreferenceRegistry>, params: ScoreParams) -> Arc<Scorer> {
    Arc::new(Scorer::new(registry, params).unwrap())
}

pub fn default_scorer(registry: Arc<PreferenceRegistry>) -> Arc<Scorer> {
    scorer(registry, ScoreParams::default())
}

pub fn fast_options(iterations: usize, runs: usize, seed: u64) -> OptimizationOptions {
    OptimizationOptions::builder()
        .schedule(
            AnnealSchedule::builder()
                .iterations(iterations)
                .initial_temperature(50.0)
                .cooling_rate(0.999)
                .early_stop(false)
                .build(),
        )
        .parallel_runs(runs)
        .seed(seed)
        .build()
}

/// Twelve people in four mutual pairs plus a few one-way wishes.
pub fn classroom() -> RosterBuilder {
    RosterBuilder::new()
        .person("Ada", &["Ben"])
        .person("Ben", &["Ada"])
        .person("Cy", &["Dee", "Eve"])
        .person("Dee", &["Cy"])
        .person("Eve", &["Fay"])
        .person("Fay", &["Eve"])
        .weighted("Gus", &["Hal"], 2.0)
        .person("Hal", &["Gus"])
        .person("Ivy", &["Ada", "Jo"])
        .person("Jo", &[])
        .person("Kim", &["Lou"])
        .person("Lou", &[])
}
