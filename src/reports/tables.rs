use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use seatforge::optimizer::{RunSummary, SweepPoint};
use seatforge::scorer::ScoreDetails;
use seatforge::stats::SeatingReport;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::Range<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_score(d: &ScoreDetails) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new("Preferences").fg(Color::Green),
        Cell::new("Gaps"),
        Cell::new("Gap Penalty").fg(Color::Red),
        Cell::new("Seated"),
        Cell::new("Unknown"),
    ]);
    table.add_row(vec![
        Cell::new(format!("{:.2}", d.total)).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", d.preference_score)).fg(Color::Green),
        Cell::new(d.gap_count),
        Cell::new(format!("{:.0}", d.gap_penalty)).fg(Color::Red),
        Cell::new(d.occupied_seats),
        Cell::new(d.unknown_ids.len()),
    ]);
    align_right(&mut table, 0..6);
    println!("\n{}", table);
}

pub fn print_statistics(report: &SeatingReport) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Person").add_attribute(Attribute::Bold),
        Cell::new("Fulfilled"),
        Cell::new("Wishes"),
        Cell::new("%"),
    ]);
    align_right(&mut table, 1..4);

    for p in &report.per_person {
        let pct = match p.percentage {
            Some(v) => format!("{:.1}", v),
            None => "N/A".to_string(),
        };
        let pct_cell = if p.preferences > 0 && p.fulfilled == 0 {
            Cell::new(pct).fg(Color::Red)
        } else {
            Cell::new(pct)
        };
        table.add_row(vec![
            Cell::new(&p.id),
            Cell::new(p.fulfilled),
            Cell::new(p.preferences),
            pct_cell,
        ]);
    }
    println!("\n{}", table);

    match report.average_fulfilled {
        Some(avg) => println!("Average fulfilled wishes: {:.1}", avg),
        None => println!("Average fulfilled wishes: N/A"),
    }
    if !report.unsatisfied.is_empty() {
        println!("No wish fulfilled: {}", report.unsatisfied.join(", "));
    }
    if !report.unknown.is_empty() {
        println!("Not on the roster: {}", report.unknown.join(", "));
    }
}

pub fn print_runs(runs: &[RunSummary], best: Option<usize>) {
    if runs.is_empty() {
        return;
    }
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Run").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Iterations"),
        Cell::new("Accepted"),
        Cell::new("Refine"),
        Cell::new("Stop"),
        Cell::new("ms"),
    ]);
    for r in runs {
        let stop = if r.early_stopped {
            "perfect"
        } else if r.cancelled {
            "cancelled"
        } else {
            ""
        };
        let run_cell = if Some(r.run_id) == best {
            Cell::new(format!("{} *", r.run_id)).add_attribute(Attribute::Bold)
        } else {
            Cell::new(r.run_id)
        };
        table.add_row(vec![
            run_cell,
            Cell::new(format!("{:.3}", r.best_score)).fg(Color::Cyan),
            Cell::new(r.iterations),
            Cell::new(r.accepted),
            Cell::new(r.refine_improvements),
            Cell::new(stop),
            Cell::new(r.anneal_ms + r.refine_ms),
        ]);
    }
    align_right(&mut table, 1..7);
    println!("\n{}", table);
}

pub fn print_sweep(points: &[SweepPoint]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Initial T").add_attribute(Attribute::Bold),
        Cell::new("Cooling"),
        Cell::new("Score").fg(Color::Cyan),
    ]);
    for p in points {
        table.add_row(vec![
            Cell::new(format!("{}", p.initial_temperature)),
            Cell::new(format!("{}", p.cooling_rate)),
            Cell::new(format!("{:.3}", p.score)).fg(Color::Cyan),
        ]);
    }
    align_right(&mut table, 0..3);
    println!("\n{}", table);
}
