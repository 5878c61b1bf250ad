//! revboard-tui - TUI frontend for revboard using Ratatui

pub mod app;
pub mod tabs;
pub mod theme;
pub mod ui;

pub use app::App;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use revboard_core::DataSet;
use std::io;
use std::time::Duration;

/// Run the TUI application
///
/// All computation is synchronous and re-runs from current inputs on each
/// draw; there is no background work, so the loop is a plain poll + draw.
pub fn run(data: DataSet) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(
        has_revenue = data.revenue.is_some(),
        has_timesheet = data.timesheet.is_some(),
        "Starting TUI"
    );
    let mut app = App::new(data);
    let mut ui = ui::Ui::new();

    let result = run_loop(&mut terminal, &mut app, &mut ui);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, ui: &mut ui::Ui) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui.render(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Global keys first, then the active tab
                    let handled = app.handle_key(key.code);
                    if !handled {
                        ui.handle_tab_key(key.code, app);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
