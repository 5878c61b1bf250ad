//! TUI tab implementations

pub mod calendar;
pub mod revenue;

pub use calendar::CalendarTab;
pub use revenue::RevenueTab;
