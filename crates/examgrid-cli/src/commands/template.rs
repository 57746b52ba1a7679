//! The `examgrid template` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use examgrid_core::schedule::sample_roster;

pub fn execute(output: PathBuf, students: usize) -> Result<()> {
    anyhow::ensure!(students >= 1, "at least one student is required");
    anyhow::ensure!(
        output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json")),
        "template output must be a .json file: {}",
        output.display()
    );

    let json = serde_json::to_string_pretty(&sample_roster(students))?;
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output, json)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Created {} with {students} sample students", output.display());
    println!("Each entry: student_id, name, subjects {{subject: minutes}}");
    Ok(())
}
