//! The `examgrid view` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use examgrid_core::{FilterField, ResultSet, ResultView, Shift, SortField};

pub struct ViewArgs {
    pub results: PathBuf,
    pub search: Option<String>,
    pub subject: Option<String>,
    pub room: Option<String>,
    pub date: Option<String>,
    pub shift: Option<Shift>,
    pub sort: Vec<SortField>,
    pub page: usize,
    pub options: bool,
    pub json: bool,
}

pub fn execute(args: ViewArgs) -> Result<()> {
    let results = ResultSet::load_json(&args.results)?;
    tracing::debug!(rows = results.len(), path = %args.results.display(), "loaded results");
    let mut view = ResultView::with_results(results);

    if args.options {
        print_options(&view);
        return Ok(());
    }

    let filters = [
        (FilterField::Search, args.search),
        (FilterField::Subject, args.subject),
        (FilterField::Room, args.room),
        (FilterField::Date, args.date),
        (FilterField::Shift, args.shift.map(|s| s.to_string())),
    ];
    for (field, value) in filters {
        if let Some(value) = value {
            view.set_filter(field, value);
        }
    }
    for field in args.sort {
        view.set_sort(field);
    }
    view.query_mut().set_page(args.page);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view.render())?);
    } else {
        print_page(&mut view);
    }
    Ok(())
}

const COLUMNS: [(&str, Option<SortField>); 7] = [
    ("Student", Some(SortField::StudentName)),
    ("Student ID", Some(SortField::StudentId)),
    ("Subject", Some(SortField::Subject)),
    ("Date", Some(SortField::ExamDate)),
    ("Shift", None),
    ("Time", Some(SortField::StartTime)),
    ("Room", Some(SortField::Room)),
];

/// Print the current page with sort markers in the headers.
pub(crate) fn print_page(view: &mut ResultView) {
    let headers: Vec<String> = COLUMNS
        .iter()
        .map(|(title, field)| {
            match field.and_then(|f| view.query().sort_marker(f)) {
                Some(marker) => format!("{title} {}", marker.label()),
                None => title.to_string(),
            }
        })
        .collect();

    let page = view.render();
    if page.total_filtered == 0 {
        println!("No exams match the current filters.");
        return;
    }

    let mut table = Table::new();
    table.set_header(headers);
    for row in &page.rows {
        table.add_row(vec![
            Cell::new(&row.student_name),
            Cell::new(&row.student_id),
            Cell::new(&row.subject),
            Cell::new(&row.exam_date),
            Cell::new(&row.shift),
            Cell::new(format!("{}-{}", row.start_time, row.end_time)),
            Cell::new(&row.room),
        ]);
    }
    println!("{table}");
    println!(
        "Page {} / {} ({} matching)",
        page.current_page, page.total_pages, page.total_filtered
    );
}

fn print_options(view: &ResultView) {
    let options = view.filter_options();
    println!("{}", super::summary_table(&view.summary()));
    println!("Subjects: {}", options.subjects.join(", "));
    println!("Rooms: {}", options.rooms.join(", "));
    println!("Dates: {}", options.dates.join(", "));
}
