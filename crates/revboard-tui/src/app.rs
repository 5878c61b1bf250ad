//! TUI application state

use revboard_core::DataSet;

/// Active tab in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Revenue,
    Calendar,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Revenue, Tab::Calendar]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Revenue => 0,
            Tab::Calendar => 1,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            1 => Tab::Calendar,
            _ => Tab::Revenue,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Revenue => "Revenue",
            Tab::Calendar => "Calendar",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Revenue => '1',
            Tab::Calendar => '2',
        }
    }
}

/// TUI application state
pub struct App {
    /// Loaded query-result snapshot
    pub data: DataSet,

    /// Currently active tab
    pub active_tab: Tab,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Warning shown in the footer when part of the snapshot failed to load
    pub status_message: Option<String>,
}

impl App {
    pub fn new(data: DataSet) -> Self {
        let status_message = match (&data.revenue, &data.timesheet) {
            (None, Some(_)) => Some("⚠ revenue data unavailable".to_string()),
            (Some(_), None) => Some("⚠ timesheet data unavailable".to_string()),
            _ => None,
        };
        Self {
            data,
            active_tab: Tab::Revenue,
            should_quit: false,
            status_message,
        }
    }

    /// Handle keyboard input.
    /// Returns true if the key was handled as a global key.
    pub fn handle_key(&mut self, key: crossterm::event::KeyCode) -> bool {
        use crossterm::event::KeyCode;

        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                true
            }
            KeyCode::Tab => {
                self.next_tab();
                true
            }
            KeyCode::BackTab => {
                self.prev_tab();
                true
            }
            KeyCode::Char(c) if ('1'..='2').contains(&c) => {
                let idx = (c as usize) - ('1' as usize);
                self.active_tab = Tab::from_index(idx);
                true
            }
            _ => false,
        }
    }

    fn next_tab(&mut self) {
        let idx = self.active_tab.index();
        self.active_tab = Tab::from_index((idx + 1) % Tab::all().len());
    }

    fn prev_tab(&mut self) {
        let idx = self.active_tab.index();
        self.active_tab = Tab::from_index((idx + Tab::all().len() - 1) % Tab::all().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_tab_round_trip() {
        for tab in Tab::all() {
            assert_eq!(Tab::from_index(tab.index()), *tab);
        }
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut app = App::new(DataSet::default());
        assert_eq!(app.active_tab, Tab::Revenue);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_tab, Tab::Calendar);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_tab, Tab::Revenue);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.active_tab, Tab::Calendar);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(DataSet::default());
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_status_message_flags_missing_half() {
        use revboard_core::models::{RevenueReport, Timesheet};

        let partial = DataSet {
            revenue: Some(RevenueReport::default()),
            timesheet: None,
        };
        let app = App::new(partial);
        assert!(app.status_message.as_deref().unwrap().contains("timesheet"));

        let partial = DataSet {
            revenue: None,
            timesheet: Some(Timesheet::default()),
        };
        let app = App::new(partial);
        assert!(app.status_message.as_deref().unwrap().contains("revenue"));

        assert!(App::new(DataSet::default()).status_message.is_none());
    }

    #[test]
    fn test_digit_shortcuts() {
        let mut app = App::new(DataSet::default());
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.active_tab, Tab::Calendar);
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.active_tab, Tab::Revenue);
    }
}
