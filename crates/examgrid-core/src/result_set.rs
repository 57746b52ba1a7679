//! The rows returned by one scheduling call, with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::ExamAssignment;
use crate::schedule::ScheduleResponse;
use crate::stats::{self, FilterOptions, ResultSummary};

/// Immutable list of exam assignments. A new scheduling response replaces
/// it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    rows: Vec<ExamAssignment>,
}

/// Accepted on-disk shapes: a full schedule response or a bare row array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResultFile {
    Response(ScheduleResponse),
    Rows(Vec<ExamAssignment>),
}

impl ResultSet {
    pub fn new(rows: Vec<ExamAssignment>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ExamAssignment] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn summary(&self) -> ResultSummary {
        stats::summarize(&self.rows)
    }

    pub fn filter_options(&self) -> FilterOptions {
        stats::filter_options(&self.rows)
    }

    /// Parse either `{"results": [...]}` or `[...]`.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: ResultFile =
            serde_json::from_str(content).context("failed to parse result JSON")?;
        Ok(match file {
            ResultFile::Response(resp) => Self::new(resp.results),
            ResultFile::Rows(rows) => Self::new(rows),
        })
    }

    /// Load a result set from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read results from {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("invalid results file: {}", path.display()))
    }

    /// Save the rows as a JSON array using the scheduler's field names.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize results")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        Ok(())
    }
}

impl From<Vec<ExamAssignment>> for ResultSet {
    fn from(rows: Vec<ExamAssignment>) -> Self {
        Self::new(rows)
    }
}

impl From<ScheduleResponse> for ResultSet {
    fn from(resp: ScheduleResponse) -> Self {
        Self::new(resp.results)
    }
}

impl FromIterator<ExamAssignment> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ExamAssignment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
