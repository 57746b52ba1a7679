//! examgrid-report — Timetable export.
//!
//! Writes a scheduling result as a self-contained HTML timetable or as JSON.
//! Exports always cover the whole result set, regardless of the filters
//! active in the view.

pub mod html;
pub mod json;

use anyhow::Result;

use examgrid_core::ResultSet;

/// Refuse to export when there is nothing to show.
pub(crate) fn ensure_not_empty(results: &ResultSet) -> Result<()> {
    anyhow::ensure!(!results.is_empty(), "no data to export");
    Ok(())
}
