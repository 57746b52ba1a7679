//! Request and response shapes exchanged with the remote scheduler.
//!
//! [`ScheduleForm`] is what the user fills in; [`ScheduleConfig`] is the JSON
//! body posted to `/api/schedule`. Rest days are chosen in the client weekday
//! convention and leave as remote-convention `off_days`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{default_rest_days, enumerate_days};
use crate::error::CalendarError;
use crate::model::{ExamAssignment, Shift};
use crate::weekday::remote_off_days;

/// Which sessions the exams may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Morning,
    Afternoon,
    #[default]
    Both,
}

impl SessionMode {
    pub fn shifts(self) -> Vec<Shift> {
        match self {
            SessionMode::Morning => vec![Shift::Morning],
            SessionMode::Afternoon => vec![Shift::Afternoon],
            SessionMode::Both => Shift::ALL.to_vec(),
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Morning => write!(f, "morning"),
            SessionMode::Afternoon => write!(f, "afternoon"),
            SessionMode::Both => write!(f, "both"),
        }
    }
}

impl FromStr for SessionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(SessionMode::Morning),
            "afternoon" => Ok(SessionMode::Afternoon),
            "both" | "all" => Ok(SessionMode::Both),
            other => Err(format!("unknown session mode: {other}")),
        }
    }
}

/// Start and end of a session, `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTime {
    pub start: String,
    pub end: String,
}

impl ShiftTime {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn default_for(shift: Shift) -> Self {
        match shift {
            Shift::Morning => Self::new("07:30", "11:30"),
            Shift::Afternoon => Self::new("13:30", "17:30"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
}

/// `count` room names, taking explicit names first and filling the rest
/// with `Room {i}`.
pub fn room_names(count: usize, names: &[String]) -> Vec<String> {
    (1..=count)
        .map(|i| match names.get(i - 1).map(|n| n.trim()) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("Room {i}"),
        })
        .collect()
}

/// User input for one scheduling request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleForm {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Checked rest days, client convention. `None` keeps the weekend defaults
    /// of the chosen range.
    pub rest_days: Option<Vec<u8>>,
    pub session_mode: SessionMode,
    pub morning: ShiftTime,
    pub afternoon: ShiftTime,
    pub break_minutes: u32,
    pub rooms: Vec<String>,
    /// 0 leaves the bound to the scheduler.
    pub min_students_per_room: u32,
    /// 0 leaves the bound to the scheduler.
    pub max_students_per_room: u32,
}

impl ScheduleForm {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            rest_days: None,
            session_mode: SessionMode::Both,
            morning: ShiftTime::default_for(Shift::Morning),
            afternoon: ShiftTime::default_for(Shift::Afternoon),
            break_minutes: 30,
            rooms: Vec::new(),
            min_students_per_room: 0,
            max_students_per_room: 0,
        }
    }

    /// Build the request body.
    ///
    /// Fails with `InvalidRange` when the dates are reversed and with
    /// `InvalidWeekday` when a rest day is outside `0..=6`.
    pub fn to_config(&self) -> Result<ScheduleConfig, CalendarError> {
        let days = enumerate_days(self.start_date, self.end_date)?;
        let checked = match &self.rest_days {
            Some(days) => days.clone(),
            None => default_rest_days(&days),
        };
        let off_days = remote_off_days(checked)?;

        let shifts = self.session_mode.shifts();
        let shift_times = shifts
            .iter()
            .map(|s| {
                let time = match s {
                    Shift::Morning => self.morning.clone(),
                    Shift::Afternoon => self.afternoon.clone(),
                };
                (*s, time)
            })
            .collect();

        Ok(ScheduleConfig {
            start_date: self.start_date,
            end_date: self.end_date,
            off_days,
            shifts,
            shift_times,
            break_time: self.break_minutes,
            rooms: self
                .rooms
                .iter()
                .map(|name| Room { name: name.clone() })
                .collect(),
            min_students_per_room: self.min_students_per_room,
            max_students_per_room: self.max_students_per_room,
        })
    }
}

/// JSON body of `POST /api/schedule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Remote convention, 0 = Monday.
    pub off_days: BTreeSet<u8>,
    pub shifts: Vec<Shift>,
    pub shift_times: BTreeMap<Shift, ShiftTime>,
    /// Minutes between exams.
    pub break_time: u32,
    pub rooms: Vec<Room>,
    pub min_students_per_room: u32,
    pub max_students_per_room: u32,
}

/// One student in a JSON roster: the subjects they sit, with exam length in
/// minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub student_id: String,
    pub name: String,
    pub subjects: BTreeMap<String, u32>,
}

const SAMPLE_SUBJECTS: [&str; 6] = [
    "Math",
    "Physics",
    "Chemistry",
    "Biology",
    "Literature",
    "History",
];

/// A small deterministic roster: each student sits three 90-minute subjects.
pub fn sample_roster(count: usize) -> Vec<RosterEntry> {
    (1..=count)
        .map(|i| RosterEntry {
            student_id: format!("SV{i:03}"),
            name: format!("Student {i}"),
            subjects: (0..3)
                .map(|k| (SAMPLE_SUBJECTS[(i + k) % SAMPLE_SUBJECTS.len()].to_string(), 90))
                .collect(),
        })
        .collect()
}

/// Response of `POST /api/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub total_students: usize,
    #[serde(default)]
    pub subjects: Vec<String>,
}

/// Response of `POST /api/schedule`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub results: Vec<ExamAssignment>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sample_roster_shape() {
        let roster = sample_roster(4);
        assert_eq!(roster.len(), 4);
        assert_eq!(roster[0].student_id, "SV001");
        assert!(roster.iter().all(|s| s.subjects.len() == 3));
        assert!(roster.iter().all(|s| s.subjects.values().all(|m| *m == 90)));

        let json = serde_json::to_value(&roster[0]).unwrap();
        assert_eq!(json["name"], "Student 1");
        assert_eq!(json["subjects"]["Physics"], 90);
        assert!(sample_roster(0).is_empty());
    }

    #[test]
    fn weekend_defaults_become_remote_off_days() {
        let form = ScheduleForm::new(date(2024, 6, 1), date(2024, 6, 10));
        let config = form.to_config().unwrap();
        assert_eq!(config.off_days.iter().copied().collect::<Vec<_>>(), vec![5, 6]);
    }

    #[test]
    fn explicit_rest_days_translated_and_deduplicated() {
        let mut form = ScheduleForm::new(date(2024, 6, 3), date(2024, 6, 7));
        form.rest_days = Some(vec![3, 3, 1]);
        let config = form.to_config().unwrap();
        assert_eq!(config.off_days.iter().copied().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn empty_rest_days_allowed() {
        let mut form = ScheduleForm::new(date(2024, 6, 1), date(2024, 6, 2));
        form.rest_days = Some(vec![]);
        assert!(form.to_config().unwrap().off_days.is_empty());
    }

    #[test]
    fn reversed_dates_rejected() {
        let form = ScheduleForm::new(date(2024, 6, 5), date(2024, 6, 1));
        assert!(matches!(
            form.to_config(),
            Err(CalendarError::InvalidRange { .. })
        ));
    }

    #[test]
    fn bad_rest_day_rejected() {
        let mut form = ScheduleForm::new(date(2024, 6, 1), date(2024, 6, 2));
        form.rest_days = Some(vec![7]);
        assert_eq!(
            form.to_config().unwrap_err(),
            CalendarError::InvalidWeekday { index: 7 }
        );
    }

    #[test]
    fn session_mode_selects_shift_times() {
        let mut form = ScheduleForm::new(date(2024, 6, 3), date(2024, 6, 4));
        form.session_mode = SessionMode::Afternoon;
        form.afternoon = ShiftTime::new("14:00", "17:00");
        let config = form.to_config().unwrap();
        assert_eq!(config.shifts, vec![Shift::Afternoon]);
        assert_eq!(config.shift_times.len(), 1);
        assert_eq!(config.shift_times[&Shift::Afternoon].start, "14:00");
    }

    #[test]
    fn config_wire_format() {
        let mut form = ScheduleForm::new(date(2024, 6, 1), date(2024, 6, 3));
        form.rooms = room_names(2, &[]);
        let value = serde_json::to_value(form.to_config().unwrap()).unwrap();
        assert_eq!(value["start_date"], "2024-06-01");
        assert_eq!(value["off_days"], serde_json::json!([5, 6]));
        assert_eq!(value["shifts"], serde_json::json!(["Morning", "Afternoon"]));
        assert_eq!(value["shift_times"]["Morning"]["start"], "07:30");
        assert_eq!(value["break_time"], 30);
        assert_eq!(value["rooms"][1]["name"], "Room 2");
    }

    #[test]
    fn room_names_fill_defaults() {
        let names = room_names(3, &["A101".to_string(), "  ".to_string()]);
        assert_eq!(names, vec!["A101", "Room 2", "Room 3"]);
        assert!(room_names(0, &["x".to_string()]).is_empty());
    }

    #[test]
    fn schedule_response_without_warnings() {
        let json = r#"{"results": [{"student_id": "SV001", "room": "Room 1"}]}"#;
        let resp: ScheduleResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results.len(), 1);
        assert!(resp.warnings.is_empty());
    }
}
