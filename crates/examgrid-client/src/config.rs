//! Client configuration and factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use examgrid_core::schedule::{room_names, ScheduleForm, SessionMode, ShiftTime};
use examgrid_core::Shift;

use crate::http::{HttpSchedulerClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Where the remote scheduler lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Defaults for the scheduling form; command-line flags override them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDefaults {
    #[serde(default)]
    pub session_mode: SessionMode,
    #[serde(default = "default_morning")]
    pub morning: ShiftTime,
    #[serde(default = "default_afternoon")]
    pub afternoon: ShiftTime,
    /// Minutes between consecutive exams.
    #[serde(default = "default_break")]
    pub break_minutes: u32,
    /// Room names; `Room {i}` is used when empty.
    #[serde(default)]
    pub rooms: Vec<String>,
    #[serde(default)]
    pub min_students_per_room: u32,
    #[serde(default)]
    pub max_students_per_room: u32,
}

fn default_morning() -> ShiftTime {
    ShiftTime::default_for(Shift::Morning)
}
fn default_afternoon() -> ShiftTime {
    ShiftTime::default_for(Shift::Afternoon)
}
fn default_break() -> u32 {
    30
}

impl Default for ScheduleDefaults {
    fn default() -> Self {
        Self {
            session_mode: SessionMode::default(),
            morning: default_morning(),
            afternoon: default_afternoon(),
            break_minutes: default_break(),
            rooms: Vec::new(),
            min_students_per_room: 0,
            max_students_per_room: 0,
        }
    }
}

impl ScheduleDefaults {
    /// A form for `start..=end` pre-filled from these defaults.
    pub fn form(&self, start: NaiveDate, end: NaiveDate) -> ScheduleForm {
        let mut form = ScheduleForm::new(start, end);
        form.session_mode = self.session_mode;
        form.morning = self.morning.clone();
        form.afternoon = self.afternoon.clone();
        form.break_minutes = self.break_minutes;
        form.rooms = room_names(self.rooms.len(), &self.rooms);
        form.min_students_per_room = self.min_students_per_room;
        form.max_students_per_room = self.max_students_per_room;
        form
    }
}

/// Top-level examgrid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamgridConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub schedule: ScheduleDefaults,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `examgrid.toml` in the current directory
/// 2. `~/.config/examgrid/config.toml`
///
/// `EXAMGRID_SERVER_URL` overrides `server.base_url`.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamgridConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examgrid.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ExamgridConfig::default(),
    };

    if let Ok(url) = std::env::var("EXAMGRID_SERVER_URL") {
        config.server.base_url = url;
    }

    Ok(config)
}

/// Parse a TOML document and resolve `${VAR}` references in its strings.
pub fn parse_config(content: &str) -> Result<ExamgridConfig> {
    let mut config: ExamgridConfig = toml::from_str(content)?;
    config.server.base_url = resolve_env_vars(&config.server.base_url);
    config.schedule.rooms = config
        .schedule
        .rooms
        .iter()
        .map(|r| resolve_env_vars(r))
        .collect();
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examgrid"))
}

/// Create the HTTP client described by the configuration.
pub fn create_client(config: &ExamgridConfig) -> Result<HttpSchedulerClient> {
    HttpSchedulerClient::new(&config.server.base_url, config.server.timeout_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_EXAMGRID_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_EXAMGRID_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_EXAMGRID_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no refs"), "no refs");
        std::env::remove_var("_EXAMGRID_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_EXAMGRID_SELF_REF", "${_EXAMGRID_SELF_REF}");
        assert_eq!(
            resolve_env_vars("a ${_EXAMGRID_SELF_REF} b"),
            "a ${_EXAMGRID_SELF_REF} b"
        );
        std::env::remove_var("_EXAMGRID_SELF_REF");
    }

    #[test]
    fn resolve_env_vars_unclosed_and_missing() {
        assert_eq!(resolve_env_vars("x ${_EXAMGRID_UNSET_VAR} y"), "x  y");
        assert_eq!(resolve_env_vars("tail ${OPEN"), "tail ${OPEN");
    }

    #[test]
    fn default_config() {
        let config = ExamgridConfig::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.server.timeout_secs, 120);
        assert_eq!(config.schedule.break_minutes, 30);
        assert_eq!(config.schedule.session_mode, SessionMode::Both);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[server]
base_url = "http://scheduler.local:9000"

[schedule]
session_mode = "morning"
break_minutes = 15
rooms = ["A101", "A102"]
max_students_per_room = 40

[schedule.morning]
start = "08:00"
end = "11:00"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.server.base_url, "http://scheduler.local:9000");
        assert_eq!(config.server.timeout_secs, 120);
        assert_eq!(config.schedule.session_mode, SessionMode::Morning);
        assert_eq!(config.schedule.morning.start, "08:00");
        assert_eq!(config.schedule.afternoon.start, "13:30");
        assert_eq!(config.schedule.rooms.len(), 2);
    }

    #[test]
    fn defaults_fill_form() {
        let defaults = ScheduleDefaults {
            rooms: vec!["A101".into(), String::new()],
            ..Default::default()
        };
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let form = defaults.form(start, start);
        assert_eq!(form.rooms, vec!["A101", "Room 2"]);
        assert_eq!(form.break_minutes, 30);
        assert!(form.rest_days.is_none());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/examgrid.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examgrid.toml");
        std::fs::write(&path, "[schedule]\nbreak_minutes = 45\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.schedule.break_minutes, 45);
    }
}
