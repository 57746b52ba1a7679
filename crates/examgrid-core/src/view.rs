//! A result set paired with the query state that browses it.

use crate::engine::{self, PageView};
use crate::model::{FilterField, SortField};
use crate::query::QueryState;
use crate::result_set::ResultSet;
use crate::stats::{FilterOptions, ResultSummary};

/// The single live result view.
///
/// Installing a new result set resets the query state; every other change
/// goes through [`ResultView::query_mut`] or the shortcut methods and is
/// followed by [`ResultView::render`].
#[derive(Debug, Clone, Default)]
pub struct ResultView {
    results: ResultSet,
    query: QueryState,
}

impl ResultView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing result set with a fresh query.
    pub fn with_results(results: ResultSet) -> Self {
        let mut view = Self::new();
        view.install(results);
        view
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut QueryState {
        &mut self.query
    }

    /// Replace the result set, then reset filters, sort and page.
    pub fn install(&mut self, results: ResultSet) {
        tracing::debug!(rows = results.len(), "installing result set");
        self.results = results;
        self.query.reset();
    }

    /// Project the current page and write the clamped page back.
    pub fn render(&mut self) -> PageView<'_> {
        let view = engine::project(self.results.rows(), &self.query);
        self.query.clamp_page(view.total_pages);
        view
    }

    pub fn set_sort(&mut self, field: SortField) -> PageView<'_> {
        self.query.set_sort(field);
        self.render()
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) -> PageView<'_> {
        self.query.set_filter(field, value);
        self.render()
    }

    pub fn next_page(&mut self) -> PageView<'_> {
        let total = engine::total_pages(
            engine::filter_sorted(self.results.rows(), &self.query).len(),
            self.query.page_size(),
        );
        self.query.next_page(total);
        self.render()
    }

    pub fn prev_page(&mut self) -> PageView<'_> {
        self.query.prev_page();
        self.render()
    }

    pub fn summary(&self) -> ResultSummary {
        self.results.summary()
    }

    pub fn filter_options(&self) -> FilterOptions {
        self.results.filter_options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExamAssignment;

    fn rows(n: usize) -> ResultSet {
        (0..n)
            .map(|i| ExamAssignment {
                student_id: format!("SV{i:03}"),
                student_name: format!("Student {i:03}"),
                exam_date: "2024-06-03".into(),
                start_time: "07:30".into(),
                room: "Room 1".into(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn install_resets_query() {
        let mut view = ResultView::with_results(rows(50));
        view.set_filter(FilterField::Search, "student");
        view.set_sort(SortField::Room);
        view.query_mut().set_page(3);
        view.install(rows(5));
        assert_eq!(view.query(), &QueryState::new());
        assert_eq!(view.results().len(), 5);
    }

    #[test]
    fn render_writes_back_clamped_page() {
        let mut view = ResultView::with_results(rows(30));
        view.query_mut().set_page(10);
        let page = view.render();
        assert_eq!(page.current_page, 2);
        assert_eq!(view.query().page(), 2);
    }

    #[test]
    fn paging_through_view() {
        let mut view = ResultView::with_results(rows(45));
        assert_eq!(view.next_page().current_page, 2);
        assert_eq!(view.next_page().rows.len(), 5);
        assert_eq!(view.next_page().current_page, 3);
        assert_eq!(view.prev_page().current_page, 2);
    }

    #[test]
    fn filter_change_returns_to_first_page() {
        let mut view = ResultView::with_results(rows(45));
        view.next_page();
        let page = view.set_filter(FilterField::Search, "student 04");
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_filtered, 5);
    }

    #[test]
    fn aggregates_ignore_filters() {
        let mut view = ResultView::with_results(rows(10));
        view.set_filter(FilterField::Search, "nobody");
        assert_eq!(view.render().total_filtered, 0);
        assert_eq!(view.summary().total_exams, 10);
        assert_eq!(view.filter_options().rooms, vec!["Room 1"]);
    }
}
