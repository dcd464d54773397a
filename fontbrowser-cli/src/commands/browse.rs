//! `browse` command: the interactive browser, or a plain list off-terminal.

use super::common::CommandContext;
use super::list;
use crate::error::CliError;
use crate::tui_app;

pub fn run(ctx: &CommandContext) -> Result<(), CliError> {
    if atty::is(atty::Stream::Stdout) && atty::is(atty::Stream::Stdin) {
        tui_app::run_browser(ctx)
    } else {
        tracing::debug!("Not a terminal, printing the catalog instead");
        list::run(None)
    }
}
