//! TUI Application module for Font Browser.
//!
//! This module owns the terminal for the interactive browser.
//!
//! # Architecture
//!
//! - `run_browser()` - Terminal setup and the draw/input event loop
//! - `TerminalGuard` - Restores the terminal however the loop exits
//! - `PanicHookGuard` - Sends panic reports to the log instead of the screen
//!
//! Installs run on a worker thread so the loop keeps drawing. The worker
//! reports stage messages and the final result over a channel, which the
//! loop drains before every frame. Quitting during an install waits for the
//! worker, so its staging directory is always cleaned up.

use std::io::{self, Stdout};
use std::panic;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use fontbrowser::catalog::Catalog;
use fontbrowser::manager::{FontInstaller, InstallResult};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::commands::common::CommandContext;
use crate::error::CliError;
use crate::ui::{self, BrowserState, InfoContext};

/// Input poll interval; also the spinner frame rate.
const TICK: Duration = Duration::from_millis(100);

/// Messages from the install worker.
enum WorkerEvent {
    Progress(String),
    Finished(InstallResult),
}

/// Raw mode plus alternate screen, undone on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

/// Logs panics through `tracing` while installed; the previous hook comes
/// back on drop.
///
/// The default hook writes to stderr, which would land on the alternate
/// screen and vanish with it.
struct PanicHookGuard<F: FnOnce()> {
    restore: Option<F>,
}

fn log_panics() -> PanicHookGuard<impl FnOnce()> {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "Panic in font browser");
    }));
    PanicHookGuard {
        restore: Some(move || panic::set_hook(previous)),
    }
}

impl<F: FnOnce()> Drop for PanicHookGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

/// What the details pane shows besides the selection.
fn info_context(ctx: &CommandContext, installer: &FontInstaller) -> InfoContext {
    InfoContext {
        repository: ctx.config.repository.label(),
        font_dir: installer
            .resolver()
            .font_dir()
            .map_err(|e| e.to_string()),
    }
}

/// Run the interactive browser until the user quits.
pub fn run_browser(ctx: &CommandContext) -> Result<(), CliError> {
    let installer = Arc::new(ctx.installer(None)?);
    let info = info_context(ctx, &installer);

    tracing::info!(repository = %info.repository, "Starting font browser");

    let _hook = log_panics();
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &installer, &info);

    tracing::info!("Font browser closed");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    installer: &Arc<FontInstaller>,
    info: &InfoContext,
) -> Result<(), CliError> {
    let mut state = BrowserState::new(Catalog::builtin());
    let (tx, rx) = mpsc::channel();
    let mut worker: Option<JoinHandle<()>> = None;

    let result = loop {
        drain_worker_events(&rx, &mut state);
        state.tick();
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &state, info)) {
            break Err(e.into());
        }

        if state.should_quit() {
            break Ok(());
        }

        match next_key_action(&state) {
            Ok(Some(action)) => {
                if let Some(package) = ui::apply(&mut state, action) {
                    worker = Some(spawn_install(Arc::clone(installer), package, tx.clone()));
                }
            }
            Ok(None) => {}
            Err(e) => break Err(e),
        }
    };

    if let Some(handle) = worker {
        if !handle.is_finished() {
            tracing::info!("Waiting for the running install to finish");
        }
        if handle.join().is_err() {
            tracing::error!("Install worker panicked");
        }
    }
    result
}

/// Wait up to one tick for a key press and map it to an action.
fn next_key_action(state: &BrowserState) -> Result<Option<ui::Action>, CliError> {
    if !event::poll(TICK)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            Ok(Some(ui::map_key(state.mode(), key)))
        }
        _ => Ok(None),
    }
}

fn drain_worker_events(rx: &Receiver<WorkerEvent>, state: &mut BrowserState) {
    while let Ok(event) = rx.try_recv() {
        match event {
            WorkerEvent::Progress(message) => state.update_progress(&message),
            WorkerEvent::Finished(result) => state.finish_install(&result),
        }
    }
}

fn spawn_install(
    installer: Arc<FontInstaller>,
    package: &'static str,
    tx: Sender<WorkerEvent>,
) -> JoinHandle<()> {
    tracing::info!(package, "Install requested");

    thread::spawn(move || {
        let progress = tx.clone();
        let result = installer.install_with_progress(
            package,
            Box::new(move |_stage, message| {
                let _ = progress.send(WorkerEvent::Progress(message.to_string()));
            }),
        );
        let _ = tx.send(WorkerEvent::Finished(result));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    #[test]
    fn test_info_context_uses_configured_repository() {
        let fonts = TempDir::new().unwrap();
        let mut ctx = CommandContext {
            config_path: None,
            config: Default::default(),
        };
        ctx.config.repository.owner = "acme".to_string();

        let installer = ctx.installer(Some(fonts.path().to_path_buf())).unwrap();
        let info = info_context(&ctx, &installer);

        assert_eq!(info.repository, "acme/ProgrammingFonts");
        assert_eq!(info.font_dir.unwrap(), fonts.path());
    }

    #[test]
    fn test_panic_hook_guard_restores_on_drop() {
        let restored = Cell::new(false);
        {
            let _guard = PanicHookGuard {
                restore: Some(|| restored.set(true)),
            };
            assert!(!restored.get());
        }
        assert!(restored.get());
    }
}
