use super::{Seat, Section, Table};
use crate::consts::{WEIGHT_DIAGONAL, WEIGHT_DIRECT};

#[inline(always)]
fn visit<F: FnMut(&str, f64)>(seat: Option<&Seat>, weight: f64, f: &mut F) {
    if let Some(Some(id)) = seat {
        f(id, weight);
    }
}

/// Calls `f(neighbor_id, weight)` for every occupied neighbor of a seat.
///
/// Row seats see their same-row left/right and the seat directly across
/// (weight 1.0) plus the two diagonals across (weight 0.8). A bonus seat
/// sees the row ends on its side of the table (weight 1.0 each).
#[inline]
pub fn for_each_neighbor<F: FnMut(&str, f64)>(
    table: &Table,
    section: Section,
    index: Option<usize>,
    mut f: F,
) {
    match section {
        Section::Top | Section::Bottom => {
            let Some(i) = index else { return };
            let (same, across) = if section == Section::Top {
                (&table.top, &table.bottom)
            } else {
                (&table.bottom, &table.top)
            };

            if i > 0 {
                visit(same.get(i - 1), WEIGHT_DIRECT, &mut f);
            }
            visit(same.get(i + 1), WEIGHT_DIRECT, &mut f);
            visit(across.get(i), WEIGHT_DIRECT, &mut f);
            if i > 0 {
                visit(across.get(i - 1), WEIGHT_DIAGONAL, &mut f);
            }
            visit(across.get(i + 1), WEIGHT_DIAGONAL, &mut f);
        }
        Section::BonusLeft => {
            visit(table.top.first(), WEIGHT_DIRECT, &mut f);
            visit(table.bottom.first(), WEIGHT_DIRECT, &mut f);
        }
        Section::BonusRight => {
            visit(table.top.last(), WEIGHT_DIRECT, &mut f);
            visit(table.bottom.last(), WEIGHT_DIRECT, &mut f);
        }
    }
}
