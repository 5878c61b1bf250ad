//! CLI output formatting for the report and calendar subcommands

use anyhow::{Context, Result};
use chrono::Datelike;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use revboard_core::calendar::CalendarGrid;
use revboard_core::models::Category;
use revboard_core::summary::{format_percent, SummaryTable};

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Parse a `YYYY-MM` month argument
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let date = chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}' (expected YYYY-MM)", s))?;
    Ok((date.year(), date.month()))
}

/// Format a summary table (human) or its rows as JSON
pub fn format_summary(summary: &SummaryTable, json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string());
    }

    if summary.rows.is_empty() {
        return format!("{}: no rows.", summary.kind.title());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers = [
        "Name",
        "Regular",
        "Pre-Contracted",
        "Total",
        "Consulting",
        "Consulting Pre",
        "Hands-On",
        "Squad",
        "%",
        "Cum.%",
    ];
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    }

    let effective = summary.sort_key.effective();
    let metric_total = summary.totals.metric(effective);

    for (i, row) in summary.rows.iter().enumerate() {
        let highlighted = summary.highlight_shade(i).is_some();
        let mut cells = vec![
            row.item.name.clone(),
            format_amount(row.item.regular),
            format_amount(row.item.pre_contracted),
            format_amount(row.item.total),
            format_amount(row.item.consulting_fee.unwrap_or(0.0)),
            format_amount(row.item.consulting_pre_fee.unwrap_or(0.0)),
            format_amount(row.item.hands_on_fee.unwrap_or(0.0)),
            format_amount(row.item.squad_fee.unwrap_or(0.0)),
            format_percent(row.item.metric(effective), metric_total).unwrap_or_default(),
            format!("{:.1}%", row.cumulative * 100.0),
        ];

        if let Some(link) = summary.kind.link_for(&row.item) {
            cells[0] = format!("{} ({})", row.item.name, link);
        }

        if highlighted && !no_color {
            table.add_row(cells.into_iter().map(|c| Cell::new(c).fg(Color::Yellow)));
        } else {
            table.add_row(Row::from(cells));
        }
    }

    let totals_row = vec![
        "TOTAL".to_string(),
        format_amount(summary.totals.regular),
        format_amount(summary.totals.pre_contracted),
        format_amount(summary.totals.total),
        format_amount(summary.totals.consulting_fee),
        format_amount(summary.totals.consulting_pre_fee),
        format_amount(summary.totals.hands_on_fee),
        format_amount(summary.totals.squad_fee),
        String::new(),
        String::new(),
    ];
    if no_color {
        table.add_row(Row::from(totals_row));
    } else {
        table.add_row(totals_row.into_iter().map(|c| Cell::new(c).fg(Color::Green)));
    }

    format!("{}\n{}", summary.kind.title(), table)
}

/// Format the month grid for one category (human) or totals as JSON
pub fn format_calendar(grid: &CalendarGrid, category: Category, json: bool, no_color: bool) -> String {
    if json {
        let weeks: Vec<_> = grid
            .weeks
            .iter()
            .map(|w| serde_json::json!({"total": w.total}))
            .collect();
        return serde_json::to_string_pretty(&serde_json::json!({
            "year": grid.year,
            "month": grid.month,
            "category": category,
            "weeks": weeks,
            "columnTotals": grid.column_totals,
            "grandTotal": grid.grand_total,
        }))
        .unwrap_or_else(|_| "{}".to_string());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut headers: Vec<&str> = WEEKDAY_LABELS.to_vec();
    headers.push("Total");
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    }

    for week in &grid.weeks {
        let mut cells: Vec<Cell> = week
            .cells
            .iter()
            .map(|cell| {
                let value = cell.hours.get(category);
                let text = if value > 0.0 {
                    format!("{:>2} {:>5.1}", cell.day, value)
                } else {
                    format!("{:>2}", cell.day)
                };
                let mut c = Cell::new(text);
                if !no_color {
                    if !cell.is_current() {
                        c = c.fg(Color::DarkGrey);
                    } else if cell.is_holiday {
                        c = c.fg(Color::Red);
                    }
                }
                c
            })
            .collect();

        let total = week.total.get(category);
        cells.push(Cell::new(if total > 0.0 {
            format!("{:.1}", total)
        } else {
            "-".to_string()
        }));
        table.add_row(cells);
    }

    // Column totals + grand total
    let mut totals: Vec<Cell> = grid
        .column_totals
        .iter()
        .map(|t| {
            let value = t.get(category);
            Cell::new(if value > 0.0 {
                format!("{:.1}", value)
            } else {
                "-".to_string()
            })
        })
        .collect();
    let grand = Cell::new(format!("{:.1}", grid.grand_total.get(category)));
    totals.push(if no_color { grand } else { grand.fg(Color::Green) });
    table.add_row(totals);

    format!(
        "{}-{:02} — {} hours\n{}",
        grid.year,
        grid.month,
        category.label(),
        table
    )
}

fn format_amount(value: f64) -> String {
    if value == 0.0 {
        "-".to_string()
    } else {
        format!("{:.2}", value)
    }
}
