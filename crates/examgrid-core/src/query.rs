//! Live view parameters: filters, multi-key sort and the current page.
//!
//! `QueryState` holds no derived data. Every mutation is followed by a fresh
//! projection through [`crate::engine::project`].

use serde::{Deserialize, Serialize};

use crate::model::{FilterField, SortDirection, SortField};

/// Rows per page in the result view.
pub const PAGE_SIZE: usize = 20;

/// Sort applied to a freshly installed result set: a day-by-day,
/// time-ordered timetable.
pub const DEFAULT_SORT: [SortKey; 4] = [
    SortKey::asc(SortField::ExamDate),
    SortKey::asc(SortField::StartTime),
    SortKey::asc(SortField::Room),
    SortKey::asc(SortField::StudentName),
];

/// Active filters. An empty string places no constraint on its field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub shift: String,
}

impl Filters {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.search,
            FilterField::Subject => &self.subject,
            FilterField::Room => &self.room,
            FilterField::Date => &self.date,
            FilterField::Shift => &self.shift,
        }
    }

    fn slot(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Search => &mut self.search,
            FilterField::Subject => &mut self.subject,
            FilterField::Room => &mut self.room,
            FilterField::Date => &mut self.date,
            FilterField::Shift => &mut self.shift,
        }
    }

    /// True when no field is constrained.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.subject.is_empty()
            && self.room.is_empty()
            && self.date.is_empty()
            && self.shift.is_empty()
    }
}

/// One entry of the sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub const fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Position of a field in the sort specification, for header indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortMarker {
    pub direction: SortDirection,
    /// 1-based precedence; 1 is the primary key.
    pub rank: usize,
    /// Number of keys in the whole specification.
    pub of: usize,
}

impl SortMarker {
    /// `↑`, or `↑ (2)` when more than one key is active.
    pub fn label(&self) -> String {
        if self.of > 1 {
            format!("{} ({})", self.direction.arrow(), self.rank)
        } else {
            self.direction.arrow().to_string()
        }
    }
}

/// User-controlled view parameters.
///
/// Invariants: the sort specification holds each field at most once, and
/// `page` is never below 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    filters: Filters,
    sort: Vec<SortKey>,
    page: usize,
    page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryState {
    /// Empty filters, the default sort, page 1 of [`PAGE_SIZE`] rows.
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    /// Same as [`QueryState::new`] with a custom page size (minimum 1).
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            filters: Filters::default(),
            sort: DEFAULT_SORT.to_vec(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn sort_spec(&self) -> &[SortKey] {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Restore filters, sort and page to their defaults, keeping the page size.
    pub fn reset(&mut self) {
        *self = Self::with_page_size(self.page_size);
    }

    /// Column-header click.
    ///
    /// A field already in the specification flips direction and moves to the
    /// front; the other keys keep their relative order. A new field is
    /// inserted at the front ascending. Nothing is ever dropped.
    pub fn set_sort(&mut self, field: SortField) {
        match self.sort.iter().position(|k| k.field == field) {
            Some(idx) => {
                let mut key = self.sort.remove(idx);
                key.direction = key.direction.toggled();
                self.sort.insert(0, key);
            }
            None => self.sort.insert(0, SortKey::asc(field)),
        }
    }

    /// Replace one filter value and go back to page 1.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        *self.filters.slot(field) = value.into();
        self.page = 1;
    }

    /// Clear every filter and go back to page 1.
    pub fn clear_filters(&mut self) {
        self.filters = Filters::default();
        self.page = 1;
    }

    /// Jump to a page. The upper bound is applied on the next projection.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Advance one page unless already on the last one.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    /// Go back one page unless already on the first one.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Clamp the page into `1..=max(1, total_pages)`.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page = self.page.clamp(1, total_pages.max(1));
    }

    /// Direction and rank of `field` in the sort specification.
    pub fn sort_marker(&self, field: SortField) -> Option<SortMarker> {
        self.sort
            .iter()
            .position(|k| k.field == field)
            .map(|idx| SortMarker {
                direction: self.sort[idx].direction,
                rank: idx + 1,
                of: self.sort.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(q: &QueryState) -> Vec<SortField> {
        q.sort_spec().iter().map(|k| k.field).collect()
    }

    #[test]
    fn defaults() {
        let q = QueryState::new();
        assert!(q.filters().is_empty());
        assert_eq!(q.page(), 1);
        assert_eq!(q.page_size(), PAGE_SIZE);
        assert_eq!(q.sort_spec(), &DEFAULT_SORT);
    }

    #[test]
    fn new_field_goes_to_front() {
        let mut q = QueryState::new();
        q.set_sort(SortField::Subject);
        assert_eq!(q.sort_spec()[0], SortKey::asc(SortField::Subject));
        assert_eq!(q.sort_spec().len(), 5);
        assert_eq!(&q.sort_spec()[1..], &DEFAULT_SORT);
    }

    #[test]
    fn existing_field_toggles_and_moves_to_front() {
        let mut q = QueryState::new();
        q.set_sort(SortField::StudentName);
        assert_eq!(q.sort_spec()[0], SortKey::desc(SortField::StudentName));
        assert_eq!(
            fields(&q),
            vec![
                SortField::StudentName,
                SortField::ExamDate,
                SortField::StartTime,
                SortField::Room,
            ]
        );
    }

    #[test]
    fn no_duplicate_fields() {
        let mut q = QueryState::new();
        for f in [
            SortField::Room,
            SortField::Subject,
            SortField::Room,
            SortField::StudentId,
            SortField::Subject,
            SortField::ExamDate,
        ] {
            q.set_sort(f);
        }
        let mut seen = fields(&q);
        let len = seen.len();
        seen.sort_by_key(|f| f.to_string());
        seen.dedup();
        assert_eq!(seen.len(), len);
        assert_eq!(len, 6);
    }

    #[test]
    fn filter_resets_page() {
        let mut q = QueryState::new();
        q.set_page(4);
        q.set_filter(FilterField::Room, "Room 2");
        assert_eq!(q.page(), 1);
        assert_eq!(q.filters().room, "Room 2");
        assert_eq!(q.filters().get(FilterField::Room), "Room 2");
        assert!(q.filters().subject.is_empty());
    }

    #[test]
    fn page_navigation_bounds() {
        let mut q = QueryState::new();
        q.prev_page();
        assert_eq!(q.page(), 1);
        q.next_page(2);
        q.next_page(2);
        assert_eq!(q.page(), 2);
        q.prev_page();
        assert_eq!(q.page(), 1);
        q.set_page(0);
        assert_eq!(q.page(), 1);
        q.set_page(9);
        q.clamp_page(3);
        assert_eq!(q.page(), 3);
        q.clamp_page(0);
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut q = QueryState::with_page_size(5);
        q.set_filter(FilterField::Search, "an");
        q.set_sort(SortField::Room);
        q.set_page(3);
        q.reset();
        assert_eq!(q, QueryState::with_page_size(5));
    }

    #[test]
    fn sort_marker_labels() {
        let mut q = QueryState::new();
        let marker = q.sort_marker(SortField::Room).unwrap();
        assert_eq!(marker.rank, 3);
        assert_eq!(marker.label(), "↑ (3)");
        assert!(q.sort_marker(SortField::Subject).is_none());
        q.set_sort(SortField::Room);
        assert_eq!(q.sort_marker(SortField::Room).unwrap().label(), "↓ (1)");
    }

    #[test]
    fn single_key_marker_has_no_rank() {
        let marker = SortMarker {
            direction: SortDirection::Asc,
            rank: 1,
            of: 1,
        };
        assert_eq!(marker.label(), "↑");
    }

    #[test]
    fn zero_page_size_clamped() {
        assert_eq!(QueryState::with_page_size(0).page_size(), 1);
    }
}
