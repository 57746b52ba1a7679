//! Projection of a result set through the query state.
//!
//! `project` filters, sorts and paginates in that order. It is pure: the same
//! rows and query always give the same page, and nothing is mutated.

use std::cmp::Ordering;

use serde::Serialize;

use crate::model::ExamAssignment;
use crate::query::{Filters, QueryState, SortKey};

/// The visible page plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView<'a> {
    /// Rows on the current page, in sorted order.
    pub rows: Vec<&'a ExamAssignment>,
    /// Rows surviving the filters, across all pages.
    pub total_filtered: usize,
    /// At least 1, even when nothing matches.
    pub total_pages: usize,
    /// The requested page clamped into `1..=total_pages`.
    pub current_page: usize,
}

impl PageView<'_> {
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Whether a row passes every non-empty filter.
///
/// The search text matches case-insensitively anywhere in the student name
/// or id; the other filters require exact equality.
pub fn matches(row: &ExamAssignment, filters: &Filters) -> bool {
    if !filters.search.is_empty() {
        let needle = filters.search.to_lowercase();
        let hit = row.student_name.to_lowercase().contains(&needle)
            || row.student_id.to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }
    let exact = |wanted: &str, actual: &str| wanted.is_empty() || wanted == actual;
    exact(&filters.subject, &row.subject)
        && exact(&filters.room, &row.room)
        && exact(&filters.date, &row.exam_date)
        && exact(&filters.shift, &row.shift)
}

/// Lexicographic comparison over the sort keys, first key first.
pub fn compare(a: &ExamAssignment, b: &ExamAssignment, sort: &[SortKey]) -> Ordering {
    sort.iter()
        .map(|key| {
            key.direction
                .apply(a.sort_value(key.field).cmp(b.sort_value(key.field)))
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Filter and stably sort, without paginating.
pub fn filter_sorted<'a>(rows: &'a [ExamAssignment], query: &QueryState) -> Vec<&'a ExamAssignment> {
    let mut out: Vec<&ExamAssignment> = rows
        .iter()
        .filter(|row| matches(row, query.filters()))
        .collect();
    out.sort_by(|a, b| compare(a, b, query.sort_spec()));
    out
}

/// Number of pages needed for `count` rows, never less than 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Compute the visible page.
pub fn project<'a>(rows: &'a [ExamAssignment], query: &QueryState) -> PageView<'a> {
    let filtered = filter_sorted(rows, query);
    let page_size = query.page_size();
    let total_filtered = filtered.len();
    let total_pages = total_pages(total_filtered, page_size);
    let current_page = query.page().clamp(1, total_pages);

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_filtered);
    let rows = filtered
        .get(start..end)
        .map(<[_]>::to_vec)
        .unwrap_or_default();

    tracing::debug!(
        total = total_filtered,
        page = current_page,
        pages = total_pages,
        "projected result view"
    );

    PageView {
        rows,
        total_filtered,
        total_pages,
        current_page,
    }
}
