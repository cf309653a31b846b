use super::{BonusPolicy, ScoreDetails, Scorer};
use crate::arrangement::neighbors::for_each_neighbor;
use crate::arrangement::{Arrangement, Seat, Section, Table};

/// Sum of table scores in table order.
///
/// The fold order is fixed so that a cache of per-table scores re-summed the
/// same way reproduces this value exactly.
pub fn score(scorer: &Scorer, arrangement: &Arrangement) -> f64 {
    sum_in_order(arrangement.tables.iter().map(|t| score_table(scorer, t)))
}

#[inline(always)]
pub fn sum_in_order<I: IntoIterator<Item = f64>>(parts: I) -> f64 {
    parts.into_iter().fold(0.0, |acc, s| acc + s)
}

pub fn score_table(scorer: &Scorer, table: &Table) -> f64 {
    let penalty = scorer.params().gap_penalty_per_gap;
    let mut total = 0.0;

    for (section, index, id) in table.occupied(scorer.bonus_config()) {
        total += seat_score(scorer, table, section, index, id);
    }

    total -= penalty * row_gaps(&table.top) as f64;
    total -= penalty * row_gaps(&table.bottom) as f64;
    total
}

/// Score of `id` sitting at `(section, index)` in `table`. Unknown ids score zero.
#[inline]
pub fn seat_score(
    scorer: &Scorer,
    table: &Table,
    section: Section,
    index: Option<usize>,
    id: &str,
) -> f64 {
    let Some(person) = scorer.registry().get(id) else {
        return 0.0;
    };
    if !person.has_preferences() {
        return 0.0;
    }

    let mut fulfilled = 0.0;
    for_each_neighbor(table, section, index, |other, weight| {
        if person.wants(other) {
            fulfilled += weight;
        }
    });

    let mut seat = fulfilled * person.weight;
    if fulfilled > 0.0 {
        let params = scorer.params();
        match params.bonus_policy {
            BonusPolicy::Multiplicative => seat *= params.bonus_multiplier,
            BonusPolicy::Additive => seat += params.bonus_multiplier,
        }
    }
    seat
}

/// Empty seats strictly between the first and last occupied seat of a row.
pub fn row_gaps(row: &[Seat]) -> usize {
    let mut first = None;
    let mut last = 0;
    let mut count = 0;
    for (i, seat) in row.iter().enumerate() {
        if seat.is_some() {
            first.get_or_insert(i);
            last = i;
            count += 1;
        }
    }
    match first {
        Some(first) => (last - first + 1) - count,
        None => 0,
    }
}

pub fn score_details(scorer: &Scorer, arrangement: &Arrangement) -> ScoreDetails {
    let mut d = ScoreDetails::default();
    let bonus = scorer.bonus_config();

    for table in &arrangement.tables {
        for (section, index, id) in table.occupied(bonus) {
            d.occupied_seats += 1;
            if !scorer.registry().contains(id) {
                d.unknown_ids.push(id.to_string());
            }
            d.preference_score += seat_score(scorer, table, section, index, id);
        }
        d.gap_count += row_gaps(&table.top) + row_gaps(&table.bottom);
    }

    d.gap_penalty = d.gap_count as f64 * scorer.params().gap_penalty_per_gap;
    d.total = score(scorer, arrangement);
    d.unknown_ids.sort();
    d.unknown_ids.dedup();
    d
}
