//! HTML timetable export.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use examgrid_core::engine::filter_sorted;
use examgrid_core::stats::natural_cmp;
use examgrid_core::{QueryState, ResultSet};

use crate::ensure_not_empty;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render the timetable, rows in the default date/time/room/name order.
pub fn generate_html(results: &ResultSet, title: &str) -> String {
    let summary = results.summary();
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} exams | {} students | {} rooms | generated {}</p>\n",
        summary.total_exams,
        summary.total_students,
        summary.total_rooms,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Room load
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Exams per room</h2>\n");
    html.push_str(&generate_bar_chart(&room_load(results)));
    html.push_str("</section>\n");

    // Timetable
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Timetable</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Student</th><th onclick=\"sortTable(1)\">Student ID</th><th onclick=\"sortTable(2)\">Subject</th><th onclick=\"sortTable(3)\">Date</th><th>Shift</th><th onclick=\"sortTable(5)\">Time</th><th onclick=\"sortTable(6)\">Room</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for r in filter_sorted(results.rows(), &QueryState::new()) {
        let shift_class = match r.shift.as_str() {
            "Morning" => "morning",
            "Afternoon" => "afternoon",
            _ => "",
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"subject\">{}</td><td>{}</td><td class=\"{}\">{}</td><td>{} - {}</td><td>{}</td></tr>\n",
            html_escape(&r.student_name),
            html_escape(&r.student_id),
            html_escape(&r.subject),
            html_escape(&r.exam_date),
            shift_class,
            html_escape(&r.shift),
            html_escape(&r.start_time),
            html_escape(&r.end_time),
            html_escape(&r.room),
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML timetable to a file.
pub fn write_html_report(results: &ResultSet, title: &str, path: &Path) -> Result<()> {
    ensure_not_empty(results)?;
    let html = generate_html(results, title);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Exam count per room, rooms in natural order.
fn room_load(results: &ResultSet) -> Vec<(String, usize)> {
    let mut load: Vec<(String, usize)> = Vec::new();
    for row in results.rows() {
        match load.iter_mut().find(|(room, _)| *room == row.room) {
            Some((_, n)) => *n += 1,
            None => load.push((row.room.clone(), 1)),
        }
    }
    load.sort_by(|a, b| natural_cmp(&a.0, &b.0));
    load
}

fn generate_bar_chart(load: &[(String, usize)]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 160;

    let peak = load.iter().map(|(_, n)| *n).max().unwrap_or(1).max(1);
    let total_height = load.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (room, count)) in load.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = count * max_width / peak;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(room)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#db2777\" rx=\"4\"/>\n",
            label_width, y, width, bar_height
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            count
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --morning: #dcfce7; --afternoon: #fef9c3; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --morning: #064e3b; --afternoon: #713f12; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.subject { font-weight: 600; color: #be185d; }
.morning { background: var(--morning); }
.afternoon { background: var(--afternoon); }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, { numeric: true }) : vb.localeCompare(va, undefined, { numeric: true });
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
