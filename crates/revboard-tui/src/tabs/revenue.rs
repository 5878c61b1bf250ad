//! Revenue tab - summary tables by type, account manager, client, sponsor

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};
use revboard_core::models::{RevenueItem, RevenueSummaries};
use revboard_core::summary::{format_percent, SortKey, SummaryTable, TableKind};

use crate::theme;

/// Revenue tab state
pub struct RevenueTab {
    /// Index into `TableKind::all()`
    table_index: usize,
    /// Index into `SortKey::all()`
    sort_index: usize,
    /// Highlighted row within the current table
    selected_row: usize,
}

impl Default for RevenueTab {
    fn default() -> Self {
        Self::new()
    }
}

impl RevenueTab {
    pub fn new() -> Self {
        Self {
            table_index: 0,
            sort_index: 0,
            selected_row: 0,
        }
    }

    pub fn table_kind(&self) -> TableKind {
        TableKind::all()[self.table_index]
    }

    pub fn sort_key(&self) -> SortKey {
        SortKey::all()[self.sort_index]
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: crossterm::event::KeyCode) {
        use crossterm::event::KeyCode;

        match key {
            KeyCode::Right | KeyCode::Char('l') => {
                self.table_index = (self.table_index + 1) % TableKind::all().len();
                self.selected_row = 0;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let n = TableKind::all().len();
                self.table_index = (self.table_index + n - 1) % n;
                self.selected_row = 0;
            }
            KeyCode::Char('s') => {
                // Sort direction is fixed descending; only the key cycles
                self.sort_index = (self.sort_index + 1) % SortKey::all().len();
                self.selected_row = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_row += 1;
            }
            _ => {}
        }
    }

    /// Render the revenue tab
    pub fn render(&mut self, frame: &mut Frame, area: Rect, summaries: Option<&RevenueSummaries>) {
        let Some(summaries) = summaries.filter(|s| !s.is_empty()) else {
            let empty = Paragraph::new("No revenue data available")
                .style(Style::default().fg(theme::dim()));
            frame.render_widget(empty, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Table selector
                Constraint::Min(0),    // Table
                Constraint::Length(1), // Footer (deep link)
            ])
            .split(area);

        self.render_selector(frame, chunks[0]);

        let kind = self.table_kind();
        let table = SummaryTable::build(kind, items_for(summaries, kind), self.sort_key());

        // Clamp selection to the sorted rows
        if !table.rows.is_empty() && self.selected_row >= table.rows.len() {
            self.selected_row = table.rows.len() - 1;
        }

        self.render_table(frame, chunks[1], &table);
        self.render_footer(frame, chunks[2], &table);
    }

    fn render_selector(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, 4); 4])
            .split(area);

        for (i, (kind, chunk)) in TableKind::all().iter().zip(chunks.iter()).enumerate() {
            let style = if i == self.table_index {
                Style::default()
                    .fg(theme::focus())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme::dim())
            };
            frame.render_widget(Paragraph::new(Span::styled(kind.title(), style)), *chunk);
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, table: &SummaryTable) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::dim()))
            .title(Span::styled(
                format!(
                    " {} — sorted by {} ",
                    table.kind.title(),
                    table.sort_key.label()
                ),
                Style::default().fg(Color::White).bold(),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let effective = table.sort_key.effective();
        let metric_total = table.totals.metric(effective);

        let mut rows: Vec<Row> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut style = Style::default().fg(Color::White);
                if let Some(shade) = table.highlight_shade(i) {
                    style = style.bg(theme::contribution_bg(shade));
                }
                if i == self.selected_row {
                    style = style.fg(theme::focus()).add_modifier(Modifier::BOLD);
                }

                Row::new(row_cells(&row.item, effective, metric_total)).style(style)
            })
            .collect();

        rows.push(
            Row::new(vec![
                "Total".to_string(),
                format_money(table.totals.regular),
                format_money(table.totals.pre_contracted),
                format_money(table.totals.total),
                format_money(table.totals.consulting_fee),
                format_money(table.totals.consulting_pre_fee),
                format_money(table.totals.hands_on_fee),
                format_money(table.totals.squad_fee),
                String::new(),
            ])
            .style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        );

        let widget = Table::new(
            rows,
            [
                Constraint::Percentage(24),
                Constraint::Percentage(10),
                Constraint::Percentage(10),
                Constraint::Percentage(10),
                Constraint::Percentage(10),
                Constraint::Percentage(10),
                Constraint::Percentage(10),
                Constraint::Percentage(10),
                Constraint::Percentage(6),
            ],
        )
        .header(
            Row::new(vec![
                "Name",
                "Regular",
                "Pre-Contr.",
                "Total",
                "Consulting",
                "Cons. Pre",
                "Hands-On",
                "Squad",
                "%",
            ])
            .style(
                Style::default()
                    .fg(theme::focus())
                    .add_modifier(Modifier::BOLD),
            ),
        );

        frame.render_widget(widget, inner);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, table: &SummaryTable) {
        let line = match table.rows.get(self.selected_row) {
            Some(row) => match table.kind.link_for(&row.item) {
                Some(link) => Line::from(vec![
                    Span::styled(format!("{}  ", row.item.name), Style::default().fg(Color::White)),
                    Span::styled(link, Style::default().fg(theme::focus())),
                ]),
                None => Line::from(Span::styled(
                    row.item.name.clone(),
                    Style::default().fg(theme::dim()),
                )),
            },
            None => Line::from(""),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn items_for<'a>(
    summaries: &'a RevenueSummaries,
    kind: TableKind,
) -> &'a [revboard_core::models::RevenueItem] {
    match kind {
        TableKind::Kinds => &summaries.by_kind,
        TableKind::AccountManagers => &summaries.by_account_manager,
        TableKind::Clients => &summaries.by_client,
        TableKind::Sponsors => &summaries.by_sponsor,
    }
}

/// Cell text for one table row, in header-column order
fn row_cells(item: &RevenueItem, effective: SortKey, metric_total: f64) -> Vec<String> {
    vec![
        item.name.clone(),
        format_money(item.regular),
        format_money(item.pre_contracted),
        format_money(item.total),
        format_money(item.consulting_fee.unwrap_or(0.0)),
        format_money(item.consulting_pre_fee.unwrap_or(0.0)),
        format_money(item.hands_on_fee.unwrap_or(0.0)),
        format_money(item.squad_fee.unwrap_or(0.0)),
        format_percent(item.metric(effective), metric_total).unwrap_or_default(),
    ]
}

fn format_money(value: f64) -> String {
    if value == 0.0 {
        "-".to_string()
    } else if value >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_table_cycling_wraps() {
        let mut tab = RevenueTab::new();
        assert_eq!(tab.table_kind(), TableKind::Kinds);
        tab.handle_key(KeyCode::Char('l'));
        assert_eq!(tab.table_kind(), TableKind::AccountManagers);
        tab.handle_key(KeyCode::Char('h'));
        tab.handle_key(KeyCode::Char('h'));
        assert_eq!(tab.table_kind(), TableKind::Sponsors);
    }

    #[test]
    fn test_sort_key_cycles_and_resets_row() {
        let mut tab = RevenueTab::new();
        tab.selected_row = 4;
        tab.handle_key(KeyCode::Char('s'));
        assert_eq!(tab.sort_key(), SortKey::Regular);
        assert_eq!(tab.selected_row, 0);
    }

    #[test]
    fn test_row_cells_carry_every_fee_column() {
        let item = RevenueItem {
            name: "Acme".to_string(),
            regular: 900.0,
            pre_contracted: 100.0,
            total: 1000.0,
            consulting_fee: Some(400.0),
            consulting_pre_fee: Some(250.0),
            hands_on_fee: Some(200.0),
            squad_fee: Some(150.0),
            ..Default::default()
        };

        let cells = row_cells(&item, SortKey::Total, 2000.0);
        // One cell per header column, consulting-pre included
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[5], "$250");
        assert_eq!(cells[8], "50.0%");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "-");
        assert_eq!(format_money(950.0), "$950");
        assert_eq!(format_money(45_300.0), "$45.3K");
        assert_eq!(format_money(1_250_000.0), "$1.25M");
    }
}
