//! Calendar selection state
//!
//! A single finite value instead of four independent nullable fields, so
//! mutual exclusion holds by construction: at most one of day, week,
//! column, or all is ever active. Selecting the already-active target
//! clears it, matching the toggle behaviour of the original UI.

/// Current selection focus within the calendar grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    /// A current-month day (day-of-month number)
    Day(u32),
    /// A week row, via its week-total cell (row index)
    Week(usize),
    /// A weekday column, via its header or column total (Sunday = 0)
    Column(usize),
    /// The whole grid, via the Total header
    All,
}

impl Selection {
    pub fn toggle_day(self, day: u32) -> Self {
        if self == Selection::Day(day) {
            Selection::None
        } else {
            Selection::Day(day)
        }
    }

    pub fn toggle_week(self, week: usize) -> Self {
        if self == Selection::Week(week) {
            Selection::None
        } else {
            Selection::Week(week)
        }
    }

    pub fn toggle_column(self, column: usize) -> Self {
        if self == Selection::Column(column) {
            Selection::None
        } else {
            Selection::Column(column)
        }
    }

    pub fn toggle_all(self) -> Self {
        if self == Selection::All {
            Selection::None
        } else {
            Selection::All
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Whether the given day cell is covered by the current selection
    pub fn covers_day(&self, day: u32, week: usize, column: usize) -> bool {
        match self {
            Selection::None => false,
            Selection::Day(d) => *d == day,
            Selection::Week(w) => *w == week,
            Selection::Column(c) => *c == column,
            Selection::All => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_one_clears_the_others() {
        let sel = Selection::None.toggle_day(15);
        assert_eq!(sel, Selection::Day(15));

        let sel = sel.toggle_week(2);
        assert_eq!(sel, Selection::Week(2));

        let sel = sel.toggle_column(5);
        assert_eq!(sel, Selection::Column(5));

        let sel = sel.toggle_all();
        assert_eq!(sel, Selection::All);

        let sel = sel.toggle_day(3);
        assert_eq!(sel, Selection::Day(3));
    }

    #[test]
    fn test_reselecting_active_target_clears() {
        assert_eq!(Selection::Day(15).toggle_day(15), Selection::None);
        assert_eq!(Selection::Week(1).toggle_week(1), Selection::None);
        assert_eq!(Selection::Column(0).toggle_column(0), Selection::None);
        assert_eq!(Selection::All.toggle_all(), Selection::None);
    }

    #[test]
    fn test_covers_day() {
        assert!(Selection::Day(15).covers_day(15, 2, 5));
        assert!(!Selection::Day(15).covers_day(16, 2, 5));
        assert!(Selection::Week(2).covers_day(9, 2, 0));
        assert!(Selection::Column(5).covers_day(1, 0, 5));
        assert!(Selection::All.covers_day(31, 4, 6));
        assert!(!Selection::None.covers_day(1, 0, 0));
    }
}
