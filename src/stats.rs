use crate::arrangement::neighbors::for_each_neighbor;
use crate::arrangement::{Arrangement, BonusConfig};
use crate::registry::{PersonId, PreferenceRegistry};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonStat {
    pub id: PersonId,
    /// Neighbors that appear in this person's preference list (unweighted).
    pub fulfilled: usize,
    pub preferences: usize,
    /// `None` when the person listed no preferences.
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatingReport {
    /// In seat order: table by table, top, bottom, then bonus seats.
    pub per_person: Vec<PersonStat>,
    /// People with preferences and not a single one fulfilled.
    pub unsatisfied: Vec<PersonId>,
    pub average_fulfilled: Option<f64>,
    /// Seated ids that are missing from the registry.
    pub unknown: Vec<PersonId>,
}

impl SeatingReport {
    pub fn satisfied_count(&self) -> usize {
        self.per_person
            .iter()
            .filter(|p| p.preferences > 0 && p.fulfilled > 0)
            .count()
    }
}

pub fn report(
    arrangement: &Arrangement,
    registry: &PreferenceRegistry,
    bonus: BonusConfig,
) -> SeatingReport {
    let mut out = SeatingReport::default();
    let mut total_fulfilled = 0usize;
    let mut with_preferences = 0usize;

    for table in &arrangement.tables {
        for (section, index, id) in table.occupied(bonus) {
            let Some(person) = registry.get(id) else {
                warn!("Seated id '{}' is not in the registry", id);
                out.unknown.push(id.to_string());
                continue;
            };

            let mut fulfilled = 0usize;
            for_each_neighbor(table, section, index, |other, _| {
                if person.wants(other) {
                    fulfilled += 1;
                }
            });
            let preferences = person.preferences.len();

            let percentage = if preferences > 0 {
                with_preferences += 1;
                total_fulfilled += fulfilled;
                if fulfilled == 0 {
                    out.unsatisfied.push(person.id.clone());
                }
                Some(fulfilled as f64 / preferences as f64 * 100.0)
            } else {
                None
            };

            out.per_person.push(PersonStat {
                id: person.id.clone(),
                fulfilled,
                preferences,
                percentage,
            });
        }
    }

    out.average_fulfilled =
        (with_preferences > 0).then(|| total_fulfilled as f64 / with_preferences as f64);
    out
}
