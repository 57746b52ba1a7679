//! The `examgrid init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("examgrid.toml").exists() {
        println!("examgrid.toml already exists, skipping.");
    } else {
        std::fs::write("examgrid.toml", SAMPLE_CONFIG)?;
        println!("Created examgrid.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point [server].base_url at your scheduler");
    println!("  2. Run: examgrid upload --file students.xlsx");
    println!("  3. Run: examgrid schedule --start 2024-06-03 --end 2024-06-14");
    println!("  4. Run: examgrid view --results examgrid-results.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examgrid configuration

[server]
base_url = "http://127.0.0.1:8000"
timeout_secs = 120

[schedule]
session_mode = "both"
break_minutes = 30
rooms = []
min_students_per_room = 0
max_students_per_room = 0

[schedule.morning]
start = "07:30"
end = "11:30"

[schedule.afternoon]
start = "13:30"
end = "17:30"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let config = examgrid_client::config::parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, examgrid_client::ExamgridConfig::default());
    }
}
