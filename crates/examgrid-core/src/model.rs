//! Core data model types for examgrid.
//!
//! An [`ExamAssignment`] is one row of a scheduling response. Fields keep the
//! wire names used by the remote scheduler, and any missing or `null` field
//! reads as an empty string.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// One student sitting one exam.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamAssignment {
    #[serde(default, deserialize_with = "nullable_string")]
    pub student_id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub student_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub subject: String,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "nullable_string")]
    pub exam_date: String,
    /// `"Morning"` or `"Afternoon"` as sent by the scheduler.
    #[serde(default, deserialize_with = "nullable_string")]
    pub shift: String,
    /// `HH:MM`.
    #[serde(default, deserialize_with = "nullable_string")]
    pub start_time: String,
    /// `HH:MM`.
    #[serde(default, deserialize_with = "nullable_string")]
    pub end_time: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub room: String,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ExamAssignment {
    /// The value a sort key compares on.
    pub fn sort_value(&self, field: SortField) -> &str {
        match field {
            SortField::StudentName => &self.student_name,
            SortField::StudentId => &self.student_id,
            SortField::Subject => &self.subject,
            SortField::ExamDate => &self.exam_date,
            SortField::StartTime => &self.start_time,
            SortField::Room => &self.room,
        }
    }

    /// The session, if the scheduler sent a recognised one.
    pub fn shift_kind(&self) -> Option<Shift> {
        self.shift.parse().ok()
    }
}

/// Exam session within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Afternoon,
}

impl Shift {
    pub const ALL: [Shift; 2] = [Shift::Morning, Shift::Afternoon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" | "am" => Ok(Shift::Morning),
            "afternoon" | "pm" => Ok(Shift::Afternoon),
            other => Err(format!("unknown shift: {other}")),
        }
    }
}

/// Columns a user can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    StudentName,
    StudentId,
    Subject,
    ExamDate,
    StartTime,
    Room,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::StudentName,
        SortField::StudentId,
        SortField::Subject,
        SortField::ExamDate,
        SortField::StartTime,
        SortField::Room,
    ];
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortField::StudentName => "student-name",
            SortField::StudentId => "student-id",
            SortField::Subject => "subject",
            SortField::ExamDate => "date",
            SortField::StartTime => "start-time",
            SortField::Room => "room",
        };
        f.write_str(s)
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "studentname" | "name" => Ok(SortField::StudentName),
            "studentid" | "id" => Ok(SortField::StudentId),
            "subject" => Ok(SortField::Subject),
            "examdate" | "date" => Ok(SortField::ExamDate),
            "starttime" | "time" => Ok(SortField::StartTime),
            "room" => Ok(SortField::Room),
            _ => Err(format!("unknown sort field: {s}")),
        }
    }
}

/// Sort direction for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Filterable fields of the result view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Free text matched against student name and id.
    Search,
    Subject,
    Room,
    Date,
    Shift,
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "search" | "q" => Ok(FilterField::Search),
            "subject" => Ok(FilterField::Subject),
            "room" => Ok(FilterField::Room),
            "date" | "exam_date" => Ok(FilterField::Date),
            "shift" => Ok(FilterField::Shift),
            other => Err(format!("unknown filter field: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_fields_read_as_empty() {
        let json = r#"{"student_id": "SV001", "student_name": null, "room": "Room 1"}"#;
        let row: ExamAssignment = serde_json::from_str(json).unwrap();
        assert_eq!(row.student_id, "SV001");
        assert_eq!(row.student_name, "");
        assert_eq!(row.subject, "");
        assert_eq!(row.sort_value(SortField::Room), "Room 1");
        assert_eq!(row.shift_kind(), None);
    }

    #[test]
    fn wire_field_names_preserved() {
        let row = ExamAssignment {
            student_id: "SV001".into(),
            student_name: "Nguyễn Văn A".into(),
            subject: "Math".into(),
            exam_date: "2024-06-03".into(),
            shift: "Morning".into(),
            start_time: "07:30".into(),
            end_time: "09:00".into(),
            room: "Room 1".into(),
        };
        let value = serde_json::to_value(&row).unwrap();
        for key in [
            "student_id",
            "student_name",
            "subject",
            "exam_date",
            "shift",
            "start_time",
            "end_time",
            "room",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(row.shift_kind(), Some(Shift::Morning));
    }

    #[test]
    fn sort_field_parse_and_display() {
        for field in SortField::ALL {
            assert_eq!(field.to_string().parse::<SortField>().unwrap(), field);
        }
        assert_eq!("studentName".parse::<SortField>().unwrap(), SortField::StudentName);
        assert_eq!("exam_date".parse::<SortField>().unwrap(), SortField::ExamDate);
        assert!("shift".parse::<SortField>().is_err());
    }

    #[test]
    fn sort_field_serde_names() {
        assert_eq!(
            serde_json::to_string(&SortField::StartTime).unwrap(),
            "\"startTime\""
        );
    }

    #[test]
    fn direction_toggle_and_apply() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled().toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Asc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn shift_parse() {
        assert_eq!("morning".parse::<Shift>().unwrap(), Shift::Morning);
        assert_eq!("Afternoon".parse::<Shift>().unwrap(), Shift::Afternoon);
        assert!("evening".parse::<Shift>().is_err());
    }
}
