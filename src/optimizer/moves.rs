use crate::arrangement::{Arrangement, BonusConfig, FixedSet, SeatCoord};
use fastrand::Rng;

/// Seats the optimizer may move: per table every top seat, every bottom seat,
/// then the enabled bonus sides, minus the fixed set.
pub fn free_coordinates(
    arrangement: &Arrangement,
    fixed: &FixedSet,
    bonus: BonusConfig,
) -> Vec<SeatCoord> {
    arrangement
        .coords(bonus)
        .filter(|c| !fixed.contains(c))
        .collect()
}

/// Two distinct indices in `0..len`, uniform over ordered pairs.
///
/// The second draw covers `len - 1` values and skips past the first, so no
/// retry is needed.
#[inline(always)]
pub fn propose_indices(len: usize, rng: &mut Rng) -> Option<(usize, usize)> {
    if len < 2 {
        return None;
    }
    let first = rng.usize(0..len);
    let mut second = rng.usize(0..len - 1);
    if second >= first {
        second += 1;
    }
    Some((first, second))
}

#[inline(always)]
pub fn propose_swap(free: &[SeatCoord], rng: &mut Rng) -> Option<(SeatCoord, SeatCoord)> {
    propose_indices(free.len(), rng).map(|(a, b)| (free[a], free[b]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_proposes_same_index() {
        let mut rng = Rng::with_seed(7);
        let mut hits = [[0u32; 3]; 3];
        for _ in 0..30_000 {
            let (a, b) = propose_indices(3, &mut rng).unwrap();
            assert_ne!(a, b);
            hits[a][b] += 1;
        }
        // Six ordered pairs, each near 5000.
        for (a, row) in hits.iter().enumerate() {
            for (b, &n) in row.iter().enumerate() {
                if a != b {
                    assert!((4_500..5_500).contains(&n), "pair ({a},{b}) drawn {n} times");
                }
            }
        }
    }

    #[test]
    fn too_few_seats() {
        let mut rng = Rng::with_seed(1);
        assert!(propose_indices(0, &mut rng).is_none());
        assert!(propose_indices(1, &mut rng).is_none());
        assert_eq!(propose_indices(2, &mut rng).map(|(a, b)| a + b), Some(1));
    }
}
