pub mod calendar;
pub mod export;
pub mod init;
pub mod schedule;
pub mod template;
pub mod upload;
pub mod view;

use comfy_table::{Cell, Table};

use examgrid_core::stats::ResultSummary;

/// Exams / students / rooms of a result set.
pub fn summary_table(summary: &ResultSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Exams", "Students", "Rooms"]);
    table.add_row(vec![
        Cell::new(summary.total_exams),
        Cell::new(summary.total_students),
        Cell::new(summary.total_rooms),
    ]);
    table
}
