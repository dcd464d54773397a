//! `where` command: show where fonts are installed.

use fontbrowser::platform::PlatformPathResolver;

use super::common::CommandContext;
use crate::error::CliError;

pub fn run(name: Option<&str>, ctx: &CommandContext) -> Result<(), CliError> {
    let resolver = PlatformPathResolver::from_process()
        .with_override(ctx.config.install.font_dir.clone());
    let dir = resolver.font_dir()?;

    match name {
        Some(name) => println!("{}", dir.join(name).display()),
        None => println!("{}", dir.display()),
    }

    Ok(())
}
