//! Top-level UI composition: tab bar, content area, key-hint footer

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Tab};
use crate::tabs::{CalendarTab, RevenueTab};
use crate::theme;

/// Holds per-tab state across frames
pub struct Ui {
    revenue_tab: RevenueTab,
    calendar_tab: CalendarTab,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self {
            revenue_tab: RevenueTab::new(),
            calendar_tab: CalendarTab::new(),
        }
    }

    /// Render the whole frame
    pub fn render(&mut self, frame: &mut Frame, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Tab bar
                Constraint::Min(0),    // Content
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        self.render_tab_bar(frame, chunks[0], app);
        self.render_content(frame, chunks[1], app);
        self.render_hints(frame, chunks[2], app);
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect, app: &App) {
        let mut spans = vec![Span::styled(
            " revboard ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )];

        for tab in Tab::all() {
            let style = if *tab == app.active_tab {
                Style::default()
                    .fg(theme::focus())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme::dim())
            };
            spans.push(Span::styled(
                format!("  {}.{}", tab.shortcut(), tab.name()),
                style,
            ));
        }

        let bar = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme::dim())),
        );
        frame.render_widget(bar, area);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect, app: &App) {
        match app.active_tab {
            Tab::Revenue => {
                let summaries = app
                    .data
                    .revenue
                    .as_ref()
                    .map(|r| &r.financial.revenue_tracking.summaries);
                self.revenue_tab.render(frame, area, summaries);
            }
            Tab::Calendar => {
                self.calendar_tab
                    .render(frame, area, app.data.timesheet.as_ref());
            }
        }
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, app: &App) {
        let hints = match app.active_tab {
            Tab::Revenue => "h/l table  s sort  j/k row  Tab switch  q quit",
            Tab::Calendar => "arrows move  Enter select  [/] month  c category  Tab switch  q quit",
        };
        let mut line = vec![Span::styled(hints, Style::default().fg(theme::dim()))];
        if let Some(msg) = &app.status_message {
            line.push(Span::styled(
                format!("  {}", msg),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(line)), area);
    }

    /// Route a non-global key to the active tab
    pub fn handle_tab_key(&mut self, key: crossterm::event::KeyCode, app: &mut App) {
        match app.active_tab {
            Tab::Revenue => self.revenue_tab.handle_key(key),
            Tab::Calendar => self
                .calendar_tab
                .handle_key(key, app.data.timesheet.as_ref()),
        }
    }
}
