//! StatForge TUI: status dashboard and raw data explorer.
//!
//! Panels:
//! 1. Status: API base URL and health probe result
//! 2. Statistics Canada: vector metadata and data points
//! 3. Bank of Canada: series metadata and observations
//! 4. Help: keyboard shortcuts
//!
//! No logger is installed: anything written to stderr would tear the
//! alternate screen. Failures land in the status bar and error history.

mod app;
mod input;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use statforge_core::{Fetcher, RetryPolicy, Settings};

use crate::app::{AppState, ErrorCategory};
use crate::worker::{WorkerCommand, WorkerContext, WorkerResponse};

fn main() -> Result<()> {
    let settings = Settings::load(None).context("load settings")?;
    let ctx = WorkerContext {
        fetcher: Fetcher::new(RetryPolicy::default())?,
        probe: Fetcher::new(RetryPolicy::no_retry())?,
        settings: settings.clone(),
    };

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle =
        worker::spawn_worker(cmd_rx, resp_tx, ctx).context("spawn worker thread")?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, settings.api_base_url.clone());
    app.request_health();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker. An in-flight fetch finishes first.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::Health(health) => {
            app.status.checking = false;
            app.status.last_checked = Some(chrono::Local::now().naive_local());
            if statforge_core::explore::health_ok(&health) {
                app.set_status("API healthy");
            } else {
                let url = app.status.api_base_url.clone();
                app.push_error(ErrorCategory::Network, format!("API unhealthy: {health}"), url);
            }
            app.status.health = Some(health);
        }
        WorkerResponse::Explored { source, outcome } => {
            match &outcome {
                Ok(inspection) => app.set_status(format!(
                    "{}: {} metadata rows, {} data rows",
                    source.label(),
                    inspection.meta.len(),
                    inspection.data.len()
                )),
                Err(line) if line.starts_with("Error:") => {
                    let input = app.explorer(source).input.clone();
                    app.push_error(ErrorCategory::Network, line.clone(), input);
                }
                Err(line) => {
                    let line = line.clone();
                    app.push_error(ErrorCategory::Input, line, source.label().into());
                }
            }
            app.explorer_mut(source).finish(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Source;
    use serde_json::json;
    use statforge_core::explore::Inspection;

    fn app() -> AppState {
        let (tx, _rx) = mpsc::channel();
        let (_tx2, rx2) = mpsc::channel();
        AppState::new(tx, rx2, "http://localhost:8000".into())
    }

    #[test]
    fn unhealthy_probe_lands_in_error_history() {
        let mut app = app();
        app.status.checking = true;
        handle_worker_response(
            &mut app,
            WorkerResponse::Health(json!({"status": "error", "code": 502})),
        );
        assert!(!app.status.checking);
        assert!(app.status.last_checked.is_some());
        assert_eq!(app.error_history.len(), 1);
        assert_eq!(app.error_history[0].category, ErrorCategory::Network);
    }

    #[test]
    fn explored_results_reach_the_right_panel() {
        let mut app = app();
        app.boc.begin_fetch();
        handle_worker_response(
            &mut app,
            WorkerResponse::Explored {
                source: Source::Boc,
                outcome: Ok(Inspection::default()),
            },
        );
        assert_eq!(app.boc.status, "Success!");
        assert!(app.statcan.status.is_empty());

        handle_worker_response(
            &mut app,
            WorkerResponse::Explored {
                source: Source::StatCan,
                outcome: Err("No valid Vector IDs found.".into()),
            },
        );
        assert_eq!(app.statcan.status, "No valid Vector IDs found.");
        assert_eq!(app.error_history[0].category, ErrorCategory::Input);
    }
}
