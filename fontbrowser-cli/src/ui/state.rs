//! Browser state.
//!
//! Everything the event loop mutates lives here, separate from rendering
//! and terminal handling so it can be tested without a terminal.

use fontbrowser::catalog::Catalog;
use fontbrowser::manager::InstallResult;

/// Spinner frames shown while an install is running.
const SPINNER_FRAMES: &[&str] = &[
    "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
];

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Contents of the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    /// A neutral message, e.g. a hint.
    Info(String),
    /// An install is running; holds the latest stage message.
    Installing { package: String, stage: String },
    Succeeded(String),
    Failed(String),
}

#[derive(Debug)]
pub struct BrowserState {
    catalog: Catalog,
    query: String,
    filtered: Vec<&'static str>,
    selected: usize,
    mode: InputMode,
    status: Status,
    spinner_tick: usize,
    /// Quit was requested while an install was running.
    quit_pending: bool,
    should_quit: bool,
}

impl BrowserState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            filtered: catalog.filter(""),
            catalog,
            query: String::new(),
            selected: 0,
            mode: InputMode::Normal,
            status: Status::Ready,
            spinner_tick: 0,
            quit_pending: false,
            should_quit: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filtered(&self) -> &[&'static str] {
        &self.filtered
    }

    /// Index of the highlighted entry, if the list is non-empty.
    pub fn selected_index(&self) -> Option<usize> {
        (!self.filtered.is_empty()).then_some(self.selected)
    }

    pub fn selected_name(&self) -> Option<&'static str> {
        self.filtered.get(self.selected).copied()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_installing(&self) -> bool {
        matches!(self.status, Status::Installing { .. })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit_pending(&self) -> bool {
        self.quit_pending
    }

    /// Quit now, or once the running install has finished.
    ///
    /// The worker must not be abandoned mid-install: its staging directory
    /// is only removed when the install returns.
    pub fn quit(&mut self) {
        if self.is_installing() {
            self.quit_pending = true;
        } else {
            self.should_quit = true;
        }
    }

    // Navigation

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.filtered.len().saturating_sub(1);
    }

    // Search

    pub fn enter_search(&mut self) {
        self.mode = InputMode::Search;
    }

    pub fn exit_search(&mut self) {
        self.mode = InputMode::Normal;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_query_char(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    /// Clear the query and show the whole catalog again.
    pub fn reset_search(&mut self) {
        self.query.clear();
        self.mode = InputMode::Normal;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = self.catalog.filter(&self.query);
        self.selected = 0;
    }

    // Installation

    /// Start installing the highlighted font.
    ///
    /// Returns the package to hand to the worker, or `None` when nothing is
    /// selected or an install is already running.
    pub fn begin_install(&mut self) -> Option<&'static str> {
        if self.is_installing() {
            return None;
        }

        let Some(package) = self.selected_name() else {
            self.status = Status::Info("Please select a font first".to_string());
            return None;
        };

        self.status = Status::Installing {
            package: package.to_string(),
            stage: format!("Installing {}...", package),
        };
        self.spinner_tick = 0;
        Some(package)
    }

    /// Record a stage message from the worker.
    pub fn update_progress(&mut self, message: &str) {
        if let Status::Installing { stage, .. } = &mut self.status {
            *stage = message.to_string();
        }
    }

    pub fn finish_install(&mut self, result: &InstallResult) {
        self.status = if result.success {
            Status::Succeeded(result.message.clone())
        } else {
            Status::Failed(result.message.clone())
        };
        if self.quit_pending {
            self.should_quit = true;
        }
    }

    /// Advance the spinner; call once per redraw.
    pub fn tick(&mut self) {
        if self.is_installing() {
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()]
    }
}
