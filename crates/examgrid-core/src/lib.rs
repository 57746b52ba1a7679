//! examgrid-core — Result engine, query state and calendar translation.
//!
//! This crate holds everything the exam-scheduling client computes locally:
//! the exam-assignment data model, the filter/sort/paginate projection over a
//! scheduling result, and the date-range and weekday-convention handling used
//! to build a scheduling request. Nothing here performs IO beyond loading and
//! saving result files.

pub mod calendar;
pub mod engine;
pub mod error;
pub mod model;
pub mod query;
pub mod result_set;
pub mod schedule;
pub mod stats;
pub mod view;
pub mod weekday;

pub use error::CalendarError;
pub use model::{ExamAssignment, FilterField, Shift, SortDirection, SortField};
pub use query::{QueryState, PAGE_SIZE};
pub use result_set::ResultSet;
pub use view::ResultView;
