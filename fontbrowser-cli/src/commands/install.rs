//! `install` command: install one font package with a progress spinner.

use std::path::PathBuf;
use std::time::Duration;

use console::style;
use fontbrowser::catalog::Catalog;
use fontbrowser::manager::InstallResult;
use indicatif::{ProgressBar, ProgressStyle};

use super::common::{suggestions, CommandContext};
use crate::error::CliError;

/// Arguments of `fontbrowser install`.
#[derive(Debug, Clone)]
pub struct InstallArgs {
    pub name: String,
    pub font_dir: Option<PathBuf>,
    pub allow_unlisted: bool,
}

pub fn run(args: InstallArgs, ctx: &CommandContext) -> Result<(), CliError> {
    let catalog = Catalog::builtin();
    if !args.allow_unlisted && !catalog.contains(&args.name) {
        return Err(CliError::UnknownPackage {
            suggestions: suggestions(&catalog, &args.name),
            name: args.name,
        });
    }

    let installer = ctx.installer(args.font_dir)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Installing {}...", args.name));

    let progress = spinner.clone();
    let result = installer.install_with_progress(
        &args.name,
        Box::new(move |_stage, message| progress.set_message(message.to_string())),
    );
    spinner.finish_and_clear();

    println!("{}", format_result(&result));

    if result.success {
        for file in &result.files {
            println!("  {}", style(file.display()).dim());
        }
        Ok(())
    } else {
        Err(CliError::InstallFailed)
    }
}

/// `✓ message` in green or `✗ message` in red.
pub fn format_result(result: &InstallResult) -> String {
    if result.success {
        style(format!("✓ {}", result.message)).green().to_string()
    } else {
        style(format!("✗ {}", result.message)).red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_result_marks() {
        let ok = InstallResult {
            success: true,
            message: "Successfully installed 2 font file(s)".to_string(),
            failure: None,
            files: Vec::new(),
        };
        let text = console::strip_ansi_codes(&format_result(&ok)).into_owned();
        assert_eq!(text, "✓ Successfully installed 2 font file(s)");

        let failed = InstallResult {
            success: false,
            message: "No font files found".to_string(),
            failure: None,
            files: Vec::new(),
        };
        let text = console::strip_ansi_codes(&format_result(&failed)).into_owned();
        assert_eq!(text, "✗ No font files found");
    }

    #[test]
    fn test_unlisted_name_rejected_before_network() {
        let ctx = CommandContext {
            config_path: None,
            config: fontbrowser::config::ConfigFile::default(),
        };
        let err = run(
            InstallArgs {
                name: "hak".to_string(),
                font_dir: None,
                allow_unlisted: false,
            },
            &ctx,
        )
        .unwrap_err();

        assert!(matches!(err, CliError::UnknownPackage { .. }));
    }
}
