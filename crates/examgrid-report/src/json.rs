//! JSON export.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use examgrid_core::stats::ResultSummary;
use examgrid_core::{ExamAssignment, ResultSet};

use crate::ensure_not_empty;

/// Exported document. `results` keeps the scheduler's field names, so the
/// file can be loaded back as a result set.
#[derive(Debug, Serialize)]
pub struct JsonExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: ResultSummary,
    pub results: &'a [ExamAssignment],
}

impl<'a> JsonExport<'a> {
    pub fn new(results: &'a ResultSet) -> Self {
        Self {
            generated_at: Utc::now(),
            summary: results.summary(),
            results: results.rows(),
        }
    }
}

/// Write the full result set as pretty-printed JSON.
pub fn write_json_report(results: &ResultSet, path: &Path) -> Result<()> {
    ensure_not_empty(results)?;
    let json = serde_json::to_string_pretty(&JsonExport::new(results))
        .context("failed to serialize export")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    Ok(())
}
