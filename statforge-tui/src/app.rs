//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use serde_json::Value;

use statforge_core::domain::{Scalar, Table};
use statforge_core::explore::{Inspection, DATA_PAGE_SIZE, META_PAGE_SIZE};

use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Status,
    StatCan,
    Boc,
    Help,
}

impl Panel {
    const COUNT: usize = 4;

    pub fn index(self) -> usize {
        match self {
            Panel::Status => 0,
            Panel::StatCan => 1,
            Panel::Boc => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Status),
            1 => Some(Panel::StatCan),
            2 => Some(Panel::Boc),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Status => "Status",
            Panel::StatCan => "Statistics Canada",
            Panel::Boc => "Bank of Canada",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Status)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Status)
    }
}

/// The two raw-data explorers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    StatCan,
    Boc,
}

impl Source {
    pub fn label(self) -> &'static str {
        match self {
            Source::StatCan => "StatCan",
            Source::Boc => "BoC",
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Input,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// A table plus the page currently shown.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedTable {
    pub table: Table,
    pub page: usize,
    pub page_size: usize,
}

impl PagedTable {
    pub fn new(page_size: usize) -> Self {
        Self {
            table: Table::default(),
            page: 0,
            page_size,
        }
    }

    pub fn set(&mut self, table: Table) {
        self.table = table;
        self.page = 0;
    }

    pub fn clear(&mut self) {
        self.set(Table::default());
    }

    pub fn page_count(&self) -> usize {
        self.table.page_count(self.page_size)
    }

    pub fn rows(&self) -> &[Vec<Scalar>] {
        self.table.page(self.page, self.page_size)
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }
}

/// Which of an explorer's two tables receives paging keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFocus {
    Meta,
    Data,
}

/// One raw-data explorer: text input, status line, metadata and data tables.
#[derive(Debug)]
pub struct ExplorerState {
    pub source: Source,
    pub input: String,
    pub editing: bool,
    pub status: String,
    pub in_flight: bool,
    pub focus: TableFocus,
    pub meta: PagedTable,
    pub data: PagedTable,
}

impl ExplorerState {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            input: String::new(),
            editing: false,
            status: String::new(),
            in_flight: false,
            focus: TableFocus::Data,
            meta: PagedTable::new(META_PAGE_SIZE),
            data: PagedTable::new(DATA_PAGE_SIZE),
        }
    }

    pub fn begin_fetch(&mut self) {
        self.in_flight = true;
        self.status = "Fetching...".into();
    }

    /// Show a finished fetch. Failures clear both tables.
    pub fn finish(&mut self, outcome: Result<Inspection, String>) {
        self.in_flight = false;
        match outcome {
            Ok(inspection) => {
                self.status = "Success!".into();
                self.meta.set(inspection.meta);
                self.data.set(inspection.data);
            }
            Err(line) => {
                self.status = line;
                self.meta.clear();
                self.data.clear();
            }
        }
    }

    pub fn focused_mut(&mut self) -> &mut PagedTable {
        match self.focus {
            TableFocus::Meta => &mut self.meta,
            TableFocus::Data => &mut self.data,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            TableFocus::Meta => TableFocus::Data,
            TableFocus::Data => TableFocus::Meta,
        };
    }
}

/// Status dashboard state.
#[derive(Debug)]
pub struct StatusPanelState {
    pub api_base_url: String,
    pub health: Option<Value>,
    pub checking: bool,
    pub last_checked: Option<NaiveDateTime>,
}

impl StatusPanelState {
    pub fn new(api_base_url: String) -> Self {
        Self {
            api_base_url,
            health: None,
            checking: false,
            last_checked: None,
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Panel states
    pub status: StatusPanelState,
    pub statcan: ExplorerState,
    pub boc: ExplorerState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        api_base_url: String,
    ) -> Self {
        Self {
            active_panel: Panel::Status,
            running: true,
            status: StatusPanelState::new(api_base_url),
            statcan: ExplorerState::new(Source::StatCan),
            boc: ExplorerState::new(Source::Boc),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    pub fn explorer(&self, source: Source) -> &ExplorerState {
        match source {
            Source::StatCan => &self.statcan,
            Source::Boc => &self.boc,
        }
    }

    pub fn explorer_mut(&mut self, source: Source) -> &mut ExplorerState {
        match source {
            Source::StatCan => &mut self.statcan,
            Source::Boc => &mut self.boc,
        }
    }

    /// The explorer on the active panel, if the active panel is one.
    pub fn active_explorer_mut(&mut self) -> Option<&mut ExplorerState> {
        match self.active_panel {
            Panel::StatCan => Some(&mut self.statcan),
            Panel::Boc => Some(&mut self.boc),
            Panel::Status | Panel::Help => None,
        }
    }

    /// True while a text input has the keyboard.
    pub fn is_editing(&self) -> bool {
        match self.active_panel {
            Panel::StatCan => self.statcan.editing,
            Panel::Boc => self.boc.editing,
            Panel::Status | Panel::Help => false,
        }
    }

    /// Ask the worker for a fresh health probe.
    pub fn request_health(&mut self) {
        if self.status.checking {
            return;
        }
        if self.worker_tx.send(WorkerCommand::CheckHealth).is_ok() {
            self.status.checking = true;
            self.set_status("Checking API health...");
        } else {
            self.push_error(
                ErrorCategory::Other,
                "worker is not running".into(),
                "health check".into(),
            );
        }
    }

    /// Send the explorer's current input to the worker.
    pub fn request_fetch(&mut self, source: Source) {
        let explorer = self.explorer(source);
        if explorer.in_flight {
            self.set_warning(format!("{} fetch already in progress", source.label()));
            return;
        }
        let input = explorer.input.clone();
        let cmd = match source {
            Source::StatCan => WorkerCommand::FetchStatCan { input },
            Source::Boc => WorkerCommand::FetchBoc { input },
        };
        if self.worker_tx.send(cmd).is_ok() {
            self.explorer_mut(source).begin_fetch();
        } else {
            self.push_error(
                ErrorCategory::Other,
                "worker is not running".into(),
                format!("{} fetch", source.label()),
            );
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
