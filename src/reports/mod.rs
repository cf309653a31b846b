mod grid;
mod tables;

pub use self::grid::print_arrangement;
pub use self::tables::{print_runs, print_score, print_statistics, print_sweep};
