//! Aggregates over the unfiltered result set.
//!
//! The dashboard counts and the filter option lists always describe the whole
//! result set, not the current view.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::ExamAssignment;

/// Dashboard counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Number of exam assignments.
    pub total_exams: usize,
    /// Distinct student ids.
    pub total_students: usize,
    /// Distinct rooms.
    pub total_rooms: usize,
}

/// Distinct values offered by the subject, room and date filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Lexically sorted.
    pub subjects: Vec<String>,
    /// Natural order: "Room 2" before "Room 10".
    pub rooms: Vec<String>,
    /// ISO dates, lexically (and so chronologically) sorted.
    pub dates: Vec<String>,
}

pub fn summarize(rows: &[ExamAssignment]) -> ResultSummary {
    let students: HashSet<&str> = rows.iter().map(|r| r.student_id.as_str()).collect();
    let rooms: HashSet<&str> = rows.iter().map(|r| r.room.as_str()).collect();
    ResultSummary {
        total_exams: rows.len(),
        total_students: students.len(),
        total_rooms: rooms.len(),
    }
}

fn distinct(rows: &[ExamAssignment], field: fn(&ExamAssignment) -> &str) -> Vec<String> {
    rows.iter()
        .map(field)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn filter_options(rows: &[ExamAssignment]) -> FilterOptions {
    let mut rooms = distinct(rows, |r| &r.room);
    rooms.sort_by(|a, b| natural_cmp(a, b));

    FilterOptions {
        subjects: distinct(rows, |r| &r.subject),
        rooms,
        dates: distinct(rows, |r| &r.exam_date),
    }
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;
    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != digit => {
                out.push(make_chunk(&s[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(digit);
    }
    if let Some(prev) = in_digits {
        out.push(make_chunk(&s[start..], prev));
    }
    out
}

fn make_chunk(s: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(s)
    } else {
        Chunk::Text(s)
    }
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Numeric-aware, case-insensitive ordering.
///
/// Digit runs compare by value and text runs compare ignoring case. Strings
/// equal under those rules fall back to plain ordering so the result is total.
///
/// Diacritics are not folded: `Phòng 2` and `Phong 2` are distinct text and
/// order by code point (`o` before `ò`).
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (ca, cb) = (chunks(a), chunks(b));
    for (x, y) in ca.iter().zip(cb.iter()) {
        let ord = match (x, y) {
            (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            // Digits before letters, as in most collations.
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        };
        if ord.is_ne() {
            return ord;
        }
    }
    ca.len().cmp(&cb.len()).then_with(|| a.cmp(b))
}
