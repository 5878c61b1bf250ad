//! Query-result data models
//!
//! Everything here is produced by the upstream query layer and consumed
//! read-only by the aggregators.

pub mod revenue;
pub mod timesheet;

pub use revenue::{RevenueItem, RevenueReport, RevenueSummaries};
pub use timesheet::{BusinessCalendar, Category, DateTotals, DayHours, Holiday, Timesheet};
