//! revboard - Revenue tracking and time allocation dashboard

mod cli;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use revboard_core::calendar::CalendarGrid;
use revboard_core::models::Category;
use revboard_core::store;
use revboard_core::summary::{SortKey, SummaryTable, TableKind};
use revboard_core::DataSet;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "revboard",
    version,
    about = "Revenue tracking and time allocation dashboard",
    long_about = "A TUI and CLI dashboard over a consultancy's revenue-tracking and\n\
                  time-allocation query results.\n\
                  \n\
                  Reads the persisted query result (revenue.json, timesheet.json) from\n\
                  the data directory and renders summary tables grouped by account\n\
                  manager, client and sponsor, plus a month-view calendar of hours by\n\
                  engagement category.\n\
                  \n\
                  Examples:\n\
                    revboard                             # Run TUI (default)\n\
                    revboard report                      # Print all summary tables\n\
                    revboard report --table clients      # One table, sorted by total\n\
                    revboard report --sort consulting    # Sort by consulting fee\n\
                    revboard calendar --month 2024-03    # Month grid of hours\n\
                  \n\
                  Environment Variables:\n\
                    REVBOARD_DATA_DIR                    # Override data directory\n\
                    REVBOARD_NO_COLOR                    # Disable ANSI colors\n\
                    REVBOARD_LOG                         # Log filter (e.g. debug)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Path to the data directory (default: ~/.revboard)
    #[arg(long, env = "REVBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "REVBOARD_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Run TUI interface (default)
    Tui,
    /// Print revenue summary tables and exit
    Report {
        /// Restrict to one table
        #[arg(long, value_enum)]
        table: Option<TableArg>,
        /// Sort key (direction is fixed descending)
        #[arg(long, value_enum, default_value = "total")]
        sort: SortArg,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the month calendar grid and exit
    Calendar {
        /// Month to display as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Hour category to display
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TableArg {
    Kinds,
    Managers,
    Clients,
    Sponsors,
}

impl From<TableArg> for TableKind {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Kinds => TableKind::Kinds,
            TableArg::Managers => TableKind::AccountManagers,
            TableArg::Clients => TableKind::Clients,
            TableArg::Sponsors => TableKind::Sponsors,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Total,
    Regular,
    PreContracted,
    Consulting,
    ConsultingPre,
    HandsOn,
    Squad,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Total => SortKey::Total,
            SortArg::Regular => SortKey::Regular,
            SortArg::PreContracted => SortKey::PreContracted,
            SortArg::Consulting => SortKey::ConsultingFee,
            SortArg::ConsultingPre => SortKey::ConsultingPreFee,
            SortArg::HandsOn => SortKey::HandsOnFee,
            SortArg::Squad => SortKey::SquadFee,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Consulting,
    HandsOn,
    Squad,
    Internal,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Consulting => Category::Consulting,
            CategoryArg::HandsOn => Category::HandsOn,
            CategoryArg::Squad => Category::Squad,
            CategoryArg::Internal => Category::Internal,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .or_else(|| dirs::home_dir().map(|h| h.join(".revboard")))
        .context("Could not determine data directory")?;

    let mode = cli.mode.unwrap_or(Mode::Tui);
    init_logging(&mode, &data_dir)?;

    match mode {
        Mode::Tui => run_tui(data_dir),
        Mode::Report { table, sort, json } => {
            run_report(data_dir, table, sort.into(), json, cli.no_color)
        }
        Mode::Calendar {
            month,
            category,
            json,
        } => run_calendar(data_dir, month, category, json, cli.no_color),
    }
}

/// TUI mode logs to a file to keep the alternate screen clean; the CLI
/// modes log to stderr.
fn init_logging(mode: &Mode, data_dir: &std::path::Path) -> Result<()> {
    let filter = EnvFilter::try_from_env("REVBOARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new("revboard=info,revboard_core=info"));

    match mode {
        Mode::Tui => {
            std::fs::create_dir_all(data_dir)
                .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;
            let log_file = std::fs::File::create(data_dir.join("revboard.log"))
                .context("Failed to create log file")?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn run_tui(data_dir: PathBuf) -> Result<()> {
    tracing::info!(path = %data_dir.display(), "Loading query result");
    let data = DataSet::load(&data_dir);
    if data.is_empty() {
        eprintln!("No data found in {}", data_dir.display());
        eprintln!("Expected {} and/or {}", store::REVENUE_FILE, store::TIMESHEET_FILE);
        return Ok(());
    }
    revboard_tui::run(data)
}

fn run_report(
    data_dir: PathBuf,
    table: Option<TableArg>,
    sort: SortKey,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let report = store::load_revenue(&data_dir.join(store::REVENUE_FILE))
        .context("Failed to load revenue data")?;
    let summaries = &report.financial.revenue_tracking.summaries;

    let kinds: Vec<TableKind> = match table {
        Some(arg) => vec![arg.into()],
        None => TableKind::all().to_vec(),
    };

    let mut sections = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let items = match kind {
            TableKind::Kinds => &summaries.by_kind,
            TableKind::AccountManagers => &summaries.by_account_manager,
            TableKind::Clients => &summaries.by_client,
            TableKind::Sponsors => &summaries.by_sponsor,
        };
        let summary = SummaryTable::build(kind, items, sort);
        sections.push(cli::format_summary(&summary, json, no_color));
    }

    println!("{}", sections.join("\n\n"));
    Ok(())
}

fn run_calendar(
    data_dir: PathBuf,
    month: Option<String>,
    category: Option<CategoryArg>,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let timesheet = store::load_timesheet(&data_dir.join(store::TIMESHEET_FILE))
        .context("Failed to load timesheet data")?;

    let (year, month) = match month {
        Some(s) => cli::parse_month(&s)?,
        None => {
            let today = chrono::Local::now().date_naive();
            (today.year(), today.month())
        }
    };

    let grid = CalendarGrid::build(year, month, &timesheet);

    // An explicitly requested category is honoured even with zero hours;
    // otherwise substitute the first available one
    let category = match category {
        Some(arg) => arg.into(),
        None => grid
            .resolve_category(Category::Consulting)
            .unwrap_or(Category::Consulting),
    };

    println!("{}", cli::format_calendar(&grid, category, json, no_color));
    Ok(())
}
