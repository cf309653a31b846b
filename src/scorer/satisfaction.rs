use crate::arrangement::neighbors::for_each_neighbor;
use crate::arrangement::{Arrangement, BonusConfig, Section, Table};
use crate::registry::PreferenceRegistry;

/// Every seated, known person with a non-empty preference list has at least
/// one preferred person among their neighbors. Weights play no role here.
pub fn is_perfect_seating(
    arrangement: &Arrangement,
    registry: &PreferenceRegistry,
    bonus: BonusConfig,
) -> bool {
    arrangement.tables.iter().all(|table| {
        table
            .occupied(bonus)
            .all(|(section, index, id)| is_satisfied(table, section, index, id, registry))
    })
}

/// Whether `id` has a preferred neighbor at its seat. Vacuously true for
/// unknown ids and people without preferences.
pub fn is_satisfied(
    table: &Table,
    section: Section,
    index: Option<usize>,
    id: &str,
    registry: &PreferenceRegistry,
) -> bool {
    let Some(person) = registry.get(id) else {
        return true;
    };
    if !person.has_preferences() {
        return true;
    }
    let mut hit = false;
    for_each_neighbor(table, section, index, |other, _| {
        hit |= person.wants(other);
    });
    hit
}
