//! Stats Dashboard - Terminal UI for the Liquity system statistics
//!
//! Polls a snapshot source in the background and renders:
//! - System statistics (balances, protocol, frontend)
//! - The trove panel (liquidated trove screen when applicable)
//!
//! Usage:
//!   DASHBOARD_CONFIG_PATH=config/dashboard_config.yaml ./stats-dashboard
//!   ./stats-dashboard config/dashboard_config.yaml

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use liquity::application::dashboard::{ui, App};
use liquity::application::ButtonTheme;
use liquity::infrastructure::build_source;
use liquity::{DashboardConfig, StorePoller};
use liquity_dashboard::bin_common::{config_path_from_args, parse_args, ConfigType};

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Note: Logging is disabled for TUI - it would corrupt the alternate screen display

    let config_path = config_path_from_args(&parse_args(), ConfigType::Dashboard);
    let config = DashboardConfig::load(&config_path)?;

    let runtime = tokio::runtime::Runtime::new()?;

    let source = build_source(&config.source)?;
    let store = runtime.block_on(StorePoller::bootstrap(source.as_ref()))?;

    let running = Arc::new(AtomicBool::new(true));
    let mut poller = StorePoller::new(config.source.poll_interval());
    {
        let _guard = runtime.enter();
        poller.start(Arc::clone(&source), store.clone(), Arc::clone(&running));
    }

    let mut app = App::new(
        store,
        config.connection.to_connection_info(),
        config.stats_options(),
        ButtonTheme::default(),
    )
    .with_poll_failures(poller.failure_counter());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    running.store(false, Ordering::Release);
    runtime.block_on(poller.stop());

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Pick up snapshots published by the poller
        app.refresh();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            app.next_stat();
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            app.prev_stat();
                        }
                        KeyCode::Tab => {
                            app.toggle_focus();
                        }
                        KeyCode::Char('b') => {
                            app.toggle_balances();
                        }
                        KeyCode::Enter | KeyCode::Char('o') => {
                            app.activate_primary();
                        }
                        KeyCode::Char('r') => {
                            app.status_message = None;
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
