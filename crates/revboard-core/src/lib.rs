//! revboard-core - Core library for revboard
//!
//! Provides the query-result models, summary aggregation, calendar grid
//! construction, and the calendar selection state machine.

pub mod calendar;
pub mod error;
pub mod models;
pub mod selection;
pub mod store;
pub mod summary;

pub use calendar::{CalendarCell, CalendarGrid, CalendarWeek, CellKind};
pub use error::CoreError;
pub use selection::Selection;
pub use store::DataSet;
pub use summary::{format_percent, SortKey, SummaryTable, TableKind};
