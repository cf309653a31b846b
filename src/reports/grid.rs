use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use seatforge::arrangement::{Arrangement, BonusConfig, Seat};

fn label(seat: Option<&Seat>) -> String {
    match seat {
        Some(Some(id)) => id.clone(),
        Some(None) => "-".to_string(),
        None => String::new(),
    }
}

/// One grid per table: the bonus seats flank the two rows.
pub fn print_arrangement(arrangement: &Arrangement, bonus: BonusConfig) {
    for (t, table) in arrangement.tables.iter().enumerate() {
        println!("\nTable {}", t + 1);
        let mut grid = Table::new();
        grid.load_preset(ASCII_FULL);

        let left = bonus.has_left().then(|| label(table.bonus_left.as_ref()));
        let right = bonus.has_right().then(|| label(table.bonus_right.as_ref()));

        for (r, row) in [&table.top, &table.bottom].into_iter().enumerate() {
            let mut cells = Vec::with_capacity(row.len() + 2);
            if let Some(l) = &left {
                cells.push(Cell::new(if r == 0 { l.as_str() } else { "" }));
            }
            cells.extend(
                row.iter()
                    .map(|s| Cell::new(label(Some(s))).set_alignment(CellAlignment::Center)),
            );
            if let Some(rt) = &right {
                cells.push(Cell::new(if r == 0 { rt.as_str() } else { "" }));
            }
            grid.add_row(cells);
        }
        println!("{}", grid);
    }
}
