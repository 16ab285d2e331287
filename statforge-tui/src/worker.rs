//! Background worker thread: all network I/O runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Every
//! command produces exactly one response; errors are turned into display
//! text here so the UI never sees a raw error type.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use serde_json::Value;

use statforge_core::explore::{self, Inspection};
use statforge_core::{Fetcher, Settings};

use crate::app::Source;

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCommand {
    CheckHealth,
    FetchStatCan { input: String },
    FetchBoc { input: String },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Health(Value),
    Explored {
        source: Source,
        outcome: Result<Inspection, String>,
    },
}

/// What the worker needs to talk to the outside world.
pub struct WorkerContext {
    pub settings: Settings,
    /// Retrying fetcher for provider calls.
    pub fetcher: Fetcher,
    /// Single-attempt fetcher for the health probe.
    pub probe: Fetcher,
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    ctx: WorkerContext,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("statforge-worker".into())
        .spawn(move || worker_loop(rx, tx, ctx))
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>, ctx: WorkerContext) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => {
                if let Some(resp) = handle_command(cmd, &ctx) {
                    if tx.send(resp).is_err() {
                        break;
                    }
                }
            }
        }
    }
}

fn handle_command(cmd: WorkerCommand, ctx: &WorkerContext) -> Option<WorkerResponse> {
    let today = chrono::Local::now().date_naive();
    match cmd {
        WorkerCommand::CheckHealth => Some(WorkerResponse::Health(explore::probe_api(
            &ctx.probe,
            &ctx.settings.api_base_url,
        ))),
        WorkerCommand::FetchStatCan { input } => Some(WorkerResponse::Explored {
            source: Source::StatCan,
            outcome: explore::inspect_statcan(&ctx.fetcher, &ctx.settings, &input, today)
                .map_err(|e| e.status_line()),
        }),
        WorkerCommand::FetchBoc { input } => Some(WorkerResponse::Explored {
            source: Source::Boc,
            outcome: explore::inspect_boc(&ctx.fetcher, &ctx.settings, &input, today)
                .map_err(|e| e.status_line()),
        }),
        WorkerCommand::Shutdown => None, // handled in loop
    }
}
