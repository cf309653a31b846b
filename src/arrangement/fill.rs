use super::{Arrangement, BonusConfig};
use crate::registry::{PersonId, PreferenceRegistry};
use fastrand::Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Seats every registry member who is not yet seated into the empty seats,
/// in shuffled order. Returns the ids left over when seats run out.
///
/// Existing occupants are never moved, so manual assignments survive.
pub fn populate_free_seats(
    arrangement: &mut Arrangement,
    registry: &PreferenceRegistry,
    bonus: BonusConfig,
    rng: &mut Rng,
) -> Vec<PersonId> {
    let seated: HashSet<&str> = arrangement.occupied(bonus).map(|(_, id)| id).collect();

    let mut remaining: Vec<PersonId> = registry
        .ids()
        .into_iter()
        .filter(|id| !seated.contains(id))
        .map(str::to_string)
        .collect();
    rng.shuffle(&mut remaining);

    let empty: Vec<_> = arrangement
        .coords(bonus)
        .filter(|c| arrangement.get(c).is_none())
        .collect();

    let mut pending = remaining.into_iter();
    let mut placed = 0usize;
    for coord in empty {
        let Some(id) = pending.next() else { break };
        if let Some(slot) = arrangement.seat_mut(&coord) {
            *slot = Some(id);
            placed += 1;
        }
    }

    let leftover: Vec<PersonId> = pending.collect();
    debug!("Placed {} people into free seats", placed);
    if !leftover.is_empty() {
        warn!(
            "{} people could not be seated, not enough free seats",
            leftover.len()
        );
    }
    leftover
}
