//! Calendar tab - month view of allocated hours by engagement category
//!
//! The grid is rebuilt from the timesheet on every draw; only the cursor,
//! selection, category, and displayed month live here. Enter on a focused
//! cell applies the selection rules: a current-month day selects that day,
//! the week-total cell selects the week, a weekday header or column total
//! selects the column, and the Total header selects everything. Month
//! navigation and category switches reset the selection.

use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};
use revboard_core::calendar::{next_month, prev_month, CalendarGrid};
use revboard_core::models::{Category, DayHours, Timesheet};
use revboard_core::Selection;

use crate::theme;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Grid cursor. Row 0 is the header row, rows 1..=weeks are week rows,
/// the last row is the column-totals row. Column 7 is the total column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    row: usize,
    col: usize,
}

/// Calendar tab state
pub struct CalendarTab {
    year: i32,
    month: u32,
    category: Category,
    selection: Selection,
    cursor: Cursor,
}

impl Default for CalendarTab {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarTab {
    pub fn new() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::at(today.year(), today.month())
    }

    pub fn at(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            category: Category::Consulting,
            selection: Selection::None,
            cursor: Cursor { row: 1, col: 0 },
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Handle key input against the current timesheet
    pub fn handle_key(&mut self, key: crossterm::event::KeyCode, timesheet: Option<&Timesheet>) {
        use crossterm::event::KeyCode;

        let Some(timesheet) = timesheet else {
            return;
        };
        let grid = self.build_grid(timesheet);
        let max_row = grid.weeks.len() + 1;

        match key {
            KeyCode::Char(']') | KeyCode::Char('n') => {
                let (y, m) = next_month(self.year, self.month);
                self.set_month(y, m, timesheet);
            }
            KeyCode::Char('[') | KeyCode::Char('p') => {
                let (y, m) = prev_month(self.year, self.month);
                self.set_month(y, m, timesheet);
            }
            KeyCode::Char('c') => {
                self.cycle_category(&grid);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor.row = self.cursor.row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor.row = (self.cursor.row + 1).min(max_row);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor.col = self.cursor.col.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor.col = (self.cursor.col + 1).min(7);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.apply_selection(&grid);
            }
            _ => {}
        }
    }

    fn set_month(&mut self, year: i32, month: u32, timesheet: &Timesheet) {
        self.year = year;
        self.month = month;
        // Month navigation resets the selection and may invalidate the
        // category (no such hours in the new month)
        self.selection = Selection::None;
        self.cursor = Cursor { row: 1, col: 0 };
        let grid = self.build_grid(timesheet);
        if let Some(resolved) = grid.resolve_category(self.category) {
            self.category = resolved;
        }
    }

    fn cycle_category(&mut self, grid: &CalendarGrid) {
        let available = grid.available_categories();
        if available.is_empty() {
            return;
        }
        let next = available
            .iter()
            .position(|c| *c == self.category)
            .map(|i| available[(i + 1) % available.len()])
            .unwrap_or(available[0]);
        self.category = next;
        // Switching the displayed statistic resets the selection
        self.selection = Selection::None;
    }

    fn apply_selection(&mut self, grid: &CalendarGrid) {
        let Cursor { row, col } = self.cursor;
        let totals_row = grid.weeks.len() + 1;

        if row == 0 {
            // Header row: weekday header selects the column, Total selects all
            self.selection = if col == 7 {
                self.selection.toggle_all()
            } else {
                self.selection.toggle_column(col)
            };
        } else if row == totals_row {
            // Column-totals row mirrors the header; the grand-total cell
            // selects everything
            self.selection = if col == 7 {
                self.selection.toggle_all()
            } else {
                self.selection.toggle_column(col)
            };
        } else {
            let week = row - 1;
            if col == 7 {
                self.selection = self.selection.toggle_week(week);
            } else if let Some(cell) = grid.cell(week, col) {
                // Only current-month days are selectable
                if cell.is_current() {
                    self.selection = self.selection.toggle_day(cell.day);
                }
            }
        }
    }

    fn build_grid(&self, timesheet: &Timesheet) -> CalendarGrid {
        CalendarGrid::build(self.year, self.month, timesheet)
    }

    /// Render the calendar tab
    pub fn render(&mut self, frame: &mut Frame, area: Rect, timesheet: Option<&Timesheet>) {
        let Some(timesheet) = timesheet else {
            let empty = Paragraph::new("No timesheet data available")
                .style(Style::default().fg(theme::dim()));
            frame.render_widget(empty, area);
            return;
        };

        let grid = self.build_grid(timesheet);
        if let Some(resolved) = grid.resolve_category(self.category) {
            self.category = resolved;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Month + category tabs
                Constraint::Min(0),    // Grid
                Constraint::Length(2), // Footer
            ])
            .split(area);

        self.render_header(frame, chunks[0], &grid);
        self.render_grid(frame, chunks[1], &grid);
        self.render_footer(frame, chunks[2], &grid);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, grid: &CalendarGrid) {
        let month_name = MONTH_NAMES[(self.month as usize - 1).min(11)];
        let available = grid.available_categories();

        let mut spans = vec![Span::styled(
            format!("{} {}   ", month_name, self.year),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )];

        // A category is shown only while it has hours this month
        for category in Category::all() {
            if !available.contains(category) {
                continue;
            }
            let style = if *category == self.category {
                Style::default()
                    .fg(theme::category_color(*category))
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme::dim())
            };
            spans.push(Span::styled(format!("{}  ", category.label()), style));
        }
        if available.is_empty() {
            spans.push(Span::styled(
                "no hours this month",
                Style::default().fg(theme::dim()),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, grid: &CalendarGrid) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::dim()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let totals_row = grid.weeks.len() + 1;
        let mut rows: Vec<Row> = Vec::with_capacity(grid.weeks.len() + 2);

        // Header row: weekday names + Total
        let header_cells: Vec<Span> = (0..8)
            .map(|col| {
                let label = if col == 7 { "Total" } else { WEEKDAY_LABELS[col] };
                let mut style = Style::default()
                    .fg(theme::focus())
                    .add_modifier(Modifier::BOLD);
                if self.cursor == (Cursor { row: 0, col }) {
                    style = style.bg(Color::DarkGray);
                }
                Span::styled(label, style)
            })
            .collect();
        rows.push(Row::new(
            header_cells.into_iter().map(Line::from).collect::<Vec<_>>(),
        ));

        for (week_idx, week) in grid.weeks.iter().enumerate() {
            let mut cells: Vec<Line> = Vec::with_capacity(8);

            for (col, cell) in week.cells.iter().enumerate() {
                let value = cell.hours.get(self.category);
                let mut style = if cell.is_current() {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(theme::dim())
                };

                if cell.is_current()
                    && self.selection.covers_day(cell.day, week_idx, col)
                {
                    style = style.bg(theme::contribution_bg(150));
                }
                if self.cursor == (Cursor { row: week_idx + 1, col }) {
                    style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
                }

                let day_span = if cell.is_holiday {
                    Span::styled(format!("{:>2}", cell.day), style.fg(theme::holiday()))
                } else {
                    Span::styled(format!("{:>2}", cell.day), style)
                };
                let hours_span = if value > 0.0 {
                    Span::styled(
                        format!(" {}", format_hours(value)),
                        style.fg(theme::category_color(self.category)),
                    )
                } else {
                    Span::styled(String::new(), style)
                };
                cells.push(Line::from(vec![day_span, hours_span]));
            }

            // Week-total column (current-month cells only)
            let total = week.total.get(self.category);
            let mut style = Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD);
            if self.selection == Selection::Week(week_idx) || self.selection == Selection::All {
                style = style.bg(theme::contribution_bg(150));
            }
            if self.cursor == (Cursor { row: week_idx + 1, col: 7 }) {
                style = style.bg(Color::DarkGray);
            }
            cells.push(Line::from(Span::styled(
                if total > 0.0 {
                    format_hours(total)
                } else {
                    "-".to_string()
                },
                style,
            )));

            rows.push(Row::new(cells));
        }

        // Column-totals row + grand total
        let mut total_cells: Vec<Line> = (0..7)
            .map(|col| {
                let total = grid.column_totals[col].get(self.category);
                let mut style = Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                if self.selection == Selection::Column(col) || self.selection == Selection::All {
                    style = style.bg(theme::contribution_bg(150));
                }
                if self.cursor == (Cursor { row: totals_row, col }) {
                    style = style.bg(Color::DarkGray);
                }
                Line::from(Span::styled(
                    if total > 0.0 {
                        format_hours(total)
                    } else {
                        "-".to_string()
                    },
                    style,
                ))
            })
            .collect();

        let grand = grid.grand_total.get(self.category);
        let mut grand_style = Style::default()
            .fg(theme::category_color(self.category))
            .add_modifier(Modifier::BOLD);
        if self.selection == Selection::All {
            grand_style = grand_style.bg(theme::contribution_bg(150));
        }
        if self.cursor == (Cursor { row: totals_row, col: 7 }) {
            grand_style = grand_style.bg(Color::DarkGray);
        }
        total_cells.push(Line::from(Span::styled(format_hours(grand), grand_style)));
        rows.push(Row::new(total_cells));

        let widget = Table::new(rows, [Constraint::Ratio(1, 8); 8]).column_spacing(1);
        frame.render_widget(widget, inner);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, grid: &CalendarGrid) {
        let mut lines = Vec::with_capacity(2);

        // Focused cell detail: hours plus row/column shares
        let Cursor { row, col } = self.cursor;
        if row >= 1 && row <= grid.weeks.len() {
            let week = row - 1;
            if col < 7 {
                if let Some(cell) = grid.cell(week, col) {
                    let mut spans = vec![Span::styled(
                        format!(
                            "{} {}  {} {}h",
                            MONTH_NAMES[(cell.date.month() as usize - 1).min(11)],
                            cell.day,
                            self.category.label(),
                            format_hours(cell.hours.get(self.category)),
                        ),
                        Style::default().fg(Color::White),
                    )];
                    if let Some(pct) = grid.row_percent(week, col, self.category) {
                        spans.push(Span::styled(
                            format!("  week {}", pct),
                            Style::default().fg(theme::dim()),
                        ));
                    }
                    if let Some(pct) = grid.column_percent(week, col, self.category) {
                        spans.push(Span::styled(
                            format!("  column {}", pct),
                            Style::default().fg(theme::dim()),
                        ));
                    }
                    if let Some(reason) = &cell.holiday_reason {
                        spans.push(Span::styled(
                            format!("  holiday: {}", reason),
                            Style::default().fg(theme::holiday()),
                        ));
                    } else if cell.is_holiday {
                        spans.push(Span::styled("  holiday", Style::default().fg(theme::holiday())));
                    }
                    lines.push(Line::from(spans));
                }
            } else if let Some(pct) = grid.week_total_percent(week, self.category) {
                lines.push(Line::from(Span::styled(
                    format!("week total — {} of month", pct),
                    Style::default().fg(Color::White),
                )));
            }
        }

        // Selection summary
        if !self.selection.is_none() {
            let (label, hours) = selection_summary(&self.selection, grid);
            lines.push(Line::from(Span::styled(
                format!(
                    "selected {}: {} {}h",
                    label,
                    self.category.label(),
                    format_hours(hours.get(self.category))
                ),
                Style::default().fg(theme::focus()),
            )));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn selection_summary(selection: &Selection, grid: &CalendarGrid) -> (String, DayHours) {
    match selection {
        Selection::Day(day) => {
            let hours = grid
                .weeks
                .iter()
                .flat_map(|w| &w.cells)
                .find(|c| c.is_current() && c.day == *day)
                .map(|c| c.hours)
                .unwrap_or_default();
            (format!("day {}", day), hours)
        }
        Selection::Week(week) => {
            let hours = grid.weeks.get(*week).map(|w| w.total).unwrap_or_default();
            (format!("week {}", week + 1), hours)
        }
        Selection::Column(col) => {
            let hours = grid.column_totals.get(*col).copied().unwrap_or_default();
            let label = WEEKDAY_LABELS.get(*col).copied().unwrap_or("?");
            (format!("{}s", label), hours)
        }
        Selection::All => ("month".to_string(), grid.grand_total),
        Selection::None => (String::new(), DayHours::default()),
    }
}

fn format_hours(value: f64) -> String {
    if value == value.trunc() {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
