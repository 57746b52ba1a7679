//! The `examgrid export` command.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use examgrid_core::ResultSet;
use examgrid_report::html::write_html_report;
use examgrid_report::json::write_json_report;

pub fn execute(results: PathBuf, format: String, output: PathBuf, title: String) -> Result<()> {
    let results = ResultSet::load_json(&results)?;

    match format.as_str() {
        "html" => write_html_report(&results, &title, &output)?,
        "json" => write_json_report(&results, &output)?,
        other => anyhow::bail!("unknown export format: {other} (expected html or json)"),
    }

    info!(format = %format, path = %output.display(), "export written");
    println!("Exported {} exams to {}", results.len(), output.display());
    Ok(())
}
