//! Month-view calendar grid construction
//!
//! Builds a rectangular Sunday-first grid for a reference month: leading
//! cells padded with trailing days of the previous month, trailing cells
//! with leading days of the next month, so the grid always covers whole
//! weeks and the first and last rows both contain current-month days.
//! Week totals, column totals and per-cell percentage contributions are
//! derived here; rendering stays in the frontends.

use chrono::{Datelike, Days, NaiveDate};
use std::collections::HashMap;

use crate::models::{Category, DayHours, Timesheet};

/// Where a cell falls relative to the reference month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Prev,
    Current,
    Next,
}

/// One day cell in the rendered grid
#[derive(Debug, Clone)]
pub struct CalendarCell {
    /// Day-of-month number as displayed (of the cell's own month)
    pub day: u32,
    pub date: NaiveDate,
    pub kind: CellKind,
    pub hours: DayHours,
    pub is_holiday: bool,
    pub holiday_reason: Option<String>,
}

impl CalendarCell {
    pub fn is_current(&self) -> bool {
        self.kind == CellKind::Current
    }
}

/// One grid row: seven day cells plus the week-total column
#[derive(Debug, Clone)]
pub struct CalendarWeek {
    pub cells: Vec<CalendarCell>,
    /// Sum over current-month cells only; padding days never contribute
    pub total: DayHours,
}

/// Fully derived month grid
#[derive(Debug, Clone)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<CalendarWeek>,
    /// One per weekday column (Sunday-first), current cells only
    pub column_totals: [DayHours; 7],
    /// Total for the week-total column; equals the sum of week totals
    pub grand_total: DayHours,
}

impl CalendarGrid {
    /// Build the grid for `year`/`month` from a timesheet.
    ///
    /// Hours are looked up by exact `YYYY-MM-DD` key; dates with no entry
    /// default every category to zero. Malformed entry dates are skipped
    /// with a warning.
    pub fn build(year: i32, month: u32, timesheet: &Timesheet) -> Self {
        let hours_by_date = hours_index(timesheet);
        let holidays = holiday_index(timesheet);

        let first = first_of_month(year, month);
        let lead = first.weekday().num_days_from_sunday() as usize;
        let days = days_in_month(year, month) as usize;
        let weeks_needed = (lead + days).div_ceil(7);

        let grid_start = first - Days::new(lead as u64);

        let mut weeks = Vec::with_capacity(weeks_needed);
        let mut column_totals = [DayHours::default(); 7];
        let mut grand_total = DayHours::default();
        let mut date = grid_start;

        for _ in 0..weeks_needed {
            let mut cells = Vec::with_capacity(7);
            let mut week_total = DayHours::default();

            for col in 0..7 {
                let kind = if (date.year(), date.month()) == (year, month) {
                    CellKind::Current
                } else if date < first {
                    CellKind::Prev
                } else {
                    CellKind::Next
                };

                let hours = hours_by_date.get(&date).copied().unwrap_or_default();
                let holiday = holidays.get(&date);

                if kind == CellKind::Current {
                    week_total.add(&hours);
                    column_totals[col].add(&hours);
                }

                cells.push(CalendarCell {
                    day: date.day(),
                    date,
                    kind,
                    hours,
                    is_holiday: holiday.is_some(),
                    holiday_reason: holiday.cloned().flatten(),
                });

                date = date + Days::new(1);
            }

            grand_total.add(&week_total);
            weeks.push(CalendarWeek {
                cells,
                total: week_total,
            });
        }

        Self {
            year,
            month,
            weeks,
            column_totals,
            grand_total,
        }
    }

    pub fn cell(&self, week: usize, col: usize) -> Option<&CalendarCell> {
        self.weeks.get(week)?.cells.get(col)
    }

    /// Cell share of its week total for a category, one decimal.
    ///
    /// Absent for padding cells, zero-hour cells, and zero denominators.
    pub fn row_percent(&self, week: usize, col: usize, category: Category) -> Option<String> {
        let w = self.weeks.get(week)?;
        let cell = w.cells.get(col)?;
        self.cell_percent(cell, w.total.get(category), category)
    }

    /// Cell share of its weekday-column total for a category, one decimal
    pub fn column_percent(&self, week: usize, col: usize, category: Category) -> Option<String> {
        let cell = self.cell(week, col)?;
        let denom = self.column_totals.get(col)?.get(category);
        self.cell_percent(cell, denom, category)
    }

    /// Week-total share of the monthly grand total for a category
    pub fn week_total_percent(&self, week: usize, category: Category) -> Option<String> {
        let value = self.weeks.get(week)?.total.get(category);
        let denom = self.grand_total.get(category);
        if value == 0.0 || denom == 0.0 {
            return None;
        }
        Some(format!("{:.1}%", value / denom * 100.0))
    }

    fn cell_percent(&self, cell: &CalendarCell, denom: f64, category: Category) -> Option<String> {
        if !cell.is_current() {
            return None;
        }
        let value = cell.hours.get(category);
        if value == 0.0 || denom == 0.0 {
            return None;
        }
        Some(format!("{:.1}%", value / denom * 100.0))
    }

    /// Categories with a nonzero monthly total, in canonical order
    pub fn available_categories(&self) -> Vec<Category> {
        Category::all()
            .iter()
            .copied()
            .filter(|c| self.grand_total.get(*c) > 0.0)
            .collect()
    }

    /// Keep `preferred` if still available, otherwise substitute the first
    /// available category. None when the month has no hours at all.
    pub fn resolve_category(&self, preferred: Category) -> Option<Category> {
        let available = self.available_categories();
        if available.contains(&preferred) {
            Some(preferred)
        } else {
            available.first().copied()
        }
    }
}

/// Month before the given one
pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Month after the given one
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = next_month(year, month);
    (first_of_month(ny, nm) - Days::new(1)).day()
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Month is always 1-12 here; fall back to the epoch rather than panic
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

fn hours_index(timesheet: &Timesheet) -> HashMap<NaiveDate, DayHours> {
    let mut index = HashMap::with_capacity(timesheet.by_date.len());
    for entry in &timesheet.by_date {
        match entry.parsed_date() {
            Some(date) => {
                index.insert(date, entry.hours());
            }
            None => {
                tracing::warn!(date = %entry.date, "Skipping timesheet entry with unparseable date");
            }
        }
    }
    index
}

/// Index holidays by the calendar date they mark.
///
/// Stored holiday dates sit one day behind the day they are meant to mark
/// (timezone normalisation on the backend); the shift forward by exactly
/// one day compensates and must be preserved as-is — the backend contract
/// depends on it.
fn holiday_index(timesheet: &Timesheet) -> HashMap<NaiveDate, Option<String>> {
    let mut index = HashMap::new();
    for holiday in &timesheet.business_calendar.holidays {
        match holiday.stored_date() {
            Some(stored) => {
                index.insert(stored + Days::new(1), holiday.reason.clone());
            }
            None => {
                tracing::warn!(date = %holiday.date, "Skipping holiday with unparseable date");
            }
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BusinessCalendar, DateTotals, Holiday};

    fn entry(date: &str, consulting: f64, hands_on: f64, squad: f64, internal: f64) -> DateTotals {
        DateTotals {
            date: date.to_string(),
            total_consulting_hours: consulting,
            total_hands_on_hours: hands_on,
            total_squad_hours: squad,
            total_internal_hours: internal,
        }
    }

    fn march_2024_sheet() -> Timesheet {
        Timesheet {
            by_date: vec![
                entry("2024-03-15", 8.0, 0.0, 0.0, 0.0),
                entry("2024-03-18", 2.0, 4.0, 0.0, 1.0),
                entry("2024-03-04", 0.0, 0.0, 6.0, 0.0),
                // Padding days: visible in their cells, excluded from totals
                entry("2024-02-29", 5.0, 0.0, 0.0, 0.0),
                entry("2024-04-01", 0.0, 3.0, 0.0, 0.0),
            ],
            business_calendar: BusinessCalendar {
                holidays: vec![Holiday {
                    date: "2024-03-28T00:00:00Z".to_string(),
                    reason: Some("Good Friday".to_string()),
                }],
                working_days: Vec::new(),
            },
        }
    }

    #[test]
    fn test_grid_sizing_march_2024() {
        // 2024-03-01 is a Friday: 5 leading cells + 31 days = 36 -> 6 weeks
        let grid = CalendarGrid::build(2024, 3, &march_2024_sheet());
        assert_eq!(grid.weeks.len(), 6);
        assert!(grid.weeks.iter().all(|w| w.cells.len() == 7));

        // Leading padding comes from February (leap year: 25..=29)
        let first_week = &grid.weeks[0];
        assert_eq!(first_week.cells[0].kind, CellKind::Prev);
        assert_eq!(first_week.cells[0].day, 25);
        assert_eq!(first_week.cells[5].kind, CellKind::Current);
        assert_eq!(first_week.cells[5].day, 1);

        // First and last rows both contain current-month days
        assert!(grid.weeks[0].cells.iter().any(|c| c.is_current()));
        assert!(grid.weeks[5].cells.iter().any(|c| c.is_current()));

        // Trailing padding from April
        let last = grid.weeks[5].cells.last().unwrap();
        assert_eq!(last.kind, CellKind::Next);
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2024, 4, 6).unwrap());
    }

    #[test]
    fn test_hours_lookup_and_default_zero() {
        let grid = CalendarGrid::build(2024, 3, &march_2024_sheet());
        let day15 = grid
            .weeks
            .iter()
            .flat_map(|w| &w.cells)
            .find(|c| c.is_current() && c.day == 15)
            .unwrap();
        assert_eq!(day15.hours.consulting, 8.0);
        assert_eq!(day15.hours.hands_on, 0.0);

        let day16 = grid
            .weeks
            .iter()
            .flat_map(|w| &w.cells)
            .find(|c| c.is_current() && c.day == 16)
            .unwrap();
        assert!(day16.hours.is_zero());
    }

    #[test]
    fn test_week_totals_exclude_padding_days() {
        let grid = CalendarGrid::build(2024, 3, &march_2024_sheet());

        // 2024-02-29 is a Prev cell in week 0 with 5 consulting hours;
        // the cell shows them but the week total ignores them
        let feb29 = &grid.weeks[0].cells[4];
        assert_eq!(feb29.kind, CellKind::Prev);
        assert_eq!(feb29.hours.consulting, 5.0);
        assert_eq!(grid.weeks[0].total.consulting, 0.0);

        // 2024-04-01 (Next, week 5) likewise
        let apr1 = &grid.weeks[5].cells[1];
        assert_eq!(apr1.kind, CellKind::Next);
        assert_eq!(apr1.hours.hands_on, 3.0);
        assert_eq!(grid.weeks[5].total.hands_on, 0.0);
    }

    #[test]
    fn test_totals_reconcile() {
        let grid = CalendarGrid::build(2024, 3, &march_2024_sheet());

        for category in Category::all() {
            let weeks_sum: f64 = grid.weeks.iter().map(|w| w.total.get(*category)).sum();
            let columns_sum: f64 = grid.column_totals.iter().map(|c| c.get(*category)).sum();
            let grand = grid.grand_total.get(*category);
            assert!((weeks_sum - grand).abs() < 1e-9);
            assert!((columns_sum - grand).abs() < 1e-9);
        }

        assert_eq!(grid.grand_total.consulting, 10.0);
        assert_eq!(grid.grand_total.hands_on, 4.0);
        assert_eq!(grid.grand_total.squad, 6.0);
        assert_eq!(grid.grand_total.internal, 1.0);
    }

    #[test]
    fn test_holiday_shift_marks_next_day() {
        let grid = CalendarGrid::build(2024, 3, &march_2024_sheet());
        let cells: Vec<&CalendarCell> = grid
            .weeks
            .iter()
            .flat_map(|w| &w.cells)
            .filter(|c| c.is_current())
            .collect();

        // Stored 2024-03-28 marks the 29th, not the 28th
        let day28 = cells.iter().find(|c| c.day == 28).unwrap();
        let day29 = cells.iter().find(|c| c.day == 29).unwrap();
        assert!(!day28.is_holiday);
        assert!(day29.is_holiday);
        assert_eq!(day29.holiday_reason.as_deref(), Some("Good Friday"));
    }

    #[test]
    fn test_row_and_column_percentages() {
        let grid = CalendarGrid::build(2024, 3, &march_2024_sheet());

        // Day 15 is the only consulting entry of its week: 100% of the row
        let (week, col) = locate(&grid, 15);
        assert_eq!(
            grid.row_percent(week, col, Category::Consulting).as_deref(),
            Some("100.0%")
        );

        // Column percent: day 15 is a Friday; only consulting Friday entry
        assert_eq!(
            grid.column_percent(week, col, Category::Consulting).as_deref(),
            Some("100.0%")
        );

        // Zero-hour category on the same cell renders nothing
        assert_eq!(grid.row_percent(week, col, Category::Squad), None);

        // Padding cells never render percentages even with hours
        assert_eq!(grid.row_percent(0, 4, Category::Consulting), None);
    }

    #[test]
    fn test_week_total_percent_of_grand_total() {
        let grid = CalendarGrid::build(2024, 3, &march_2024_sheet());
        let (week15, _) = locate(&grid, 15);
        let (week18, _) = locate(&grid, 18);
        // 8 of 10 consulting hours in day-15's week, 2 in day-18's
        assert_eq!(
            grid.week_total_percent(week15, Category::Consulting).as_deref(),
            Some("80.0%")
        );
        assert_eq!(
            grid.week_total_percent(week18, Category::Consulting).as_deref(),
            Some("20.0%")
        );
        assert_eq!(grid.week_total_percent(0, Category::Consulting), None);
    }

    #[test]
    fn test_available_categories_and_substitution() {
        let grid = CalendarGrid::build(2024, 3, &march_2024_sheet());
        let available = grid.available_categories();
        assert_eq!(available.len(), 4);

        // Month with consulting only
        let sparse = Timesheet {
            by_date: vec![entry("2024-05-10", 4.0, 0.0, 0.0, 0.0)],
            business_calendar: BusinessCalendar::default(),
        };
        let grid = CalendarGrid::build(2024, 5, &sparse);
        assert_eq!(grid.available_categories(), vec![Category::Consulting]);
        assert_eq!(grid.resolve_category(Category::Squad), Some(Category::Consulting));
        assert_eq!(
            grid.resolve_category(Category::Consulting),
            Some(Category::Consulting)
        );

        // Empty month has nothing selectable
        let empty = CalendarGrid::build(2024, 6, &Timesheet::default());
        assert!(empty.available_categories().is_empty());
        assert_eq!(empty.resolve_category(Category::Consulting), None);
    }

    #[test]
    fn test_month_arithmetic() {
        assert_eq!(prev_month(2024, 1), (2023, 12));
        assert_eq!(next_month(2024, 12), (2025, 1));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_malformed_dates_are_skipped() {
        let sheet = Timesheet {
            by_date: vec![
                entry("garbage", 8.0, 0.0, 0.0, 0.0),
                entry("2024-03-05", 1.0, 0.0, 0.0, 0.0),
            ],
            business_calendar: BusinessCalendar {
                holidays: vec![Holiday {
                    date: "??".to_string(),
                    reason: None,
                }],
                working_days: Vec::new(),
            },
        };
        let grid = CalendarGrid::build(2024, 3, &sheet);
        assert_eq!(grid.grand_total.consulting, 1.0);
        assert!(grid.weeks.iter().flat_map(|w| &w.cells).all(|c| !c.is_holiday));
    }

    fn locate(grid: &CalendarGrid, day: u32) -> (usize, usize) {
        for (wi, week) in grid.weeks.iter().enumerate() {
            for (ci, cell) in week.cells.iter().enumerate() {
                if cell.is_current() && cell.day == day {
                    return (wi, ci);
                }
            }
        }
        panic!("day {} not in grid", day);
    }
}
