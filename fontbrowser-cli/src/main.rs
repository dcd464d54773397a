//! Font Browser command line.
//!
//! Running `fontbrowser` with no subcommand opens the interactive browser.

mod commands;
mod error;
mod tui_app;
mod ui;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use fontbrowser::logging::{init_logging, LogGuard, LogTarget};

use commands::common::CommandContext;
use commands::config::ConfigCommands;
use commands::install::InstallArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "fontbrowser")]
#[command(version, about = "Browse and install programming fonts", long_about = None)]
struct Cli {
    /// Configuration file (default: <config dir>/fontbrowser/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the font catalog interactively (default)
    Browse,

    /// Print the font catalog, optionally filtered
    List {
        /// Case-insensitive substring to filter by
        query: Option<String>,
    },

    /// Install a font package
    Install {
        /// Package name as shown in the catalog
        name: String,

        /// Install into this directory instead of the platform font directory
        #[arg(long, value_name = "DIR")]
        font_dir: Option<PathBuf>,

        /// Allow names that are not in the catalog
        #[arg(long)]
        allow_unlisted: bool,
    },

    /// Show the font directory, or a package's directory
    Where {
        /// Package name
        name: Option<String>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e {
            // The install command already printed its result.
            CliError::InstallFailed => {}
            e => eprintln!("Error: {}", e),
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CommandContext::load(cli.config.as_deref())?;
    let command = cli.command.unwrap_or(Commands::Browse);
    let _log_guard = init_command_logging(&command, &ctx, cli.verbose);

    match command {
        Commands::Browse => commands::browse::run(&ctx),
        Commands::List { query } => commands::list::run(query.as_deref()),
        Commands::Install {
            name,
            font_dir,
            allow_unlisted,
        } => commands::install::run(
            InstallArgs {
                name,
                font_dir,
                allow_unlisted,
            },
            &ctx,
        ),
        Commands::Where { name } => commands::location::run(name.as_deref(), &ctx),
        Commands::Config { command } => commands::config::run(command, &ctx),
    }
}

/// The browser owns the terminal and logs to a file; everything else logs
/// to stderr.
fn init_command_logging(
    command: &Commands,
    ctx: &CommandContext,
    verbose: bool,
) -> Option<LogGuard> {
    let level = if verbose {
        "debug"
    } else {
        ctx.config.logging.level.as_str()
    };
    let target = match command {
        Commands::Browse => LogTarget::File(ctx.config.logging.file_or_default()),
        _ => LogTarget::Stderr,
    };

    match init_logging(&target, level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_browse() {
        let cli = Cli::try_parse_from(["fontbrowser"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_install_flags() {
        let cli = Cli::try_parse_from([
            "fontbrowser",
            "install",
            "Envy Code R PR7",
            "--font-dir",
            "/tmp/fonts",
            "--allow-unlisted",
            "--verbose",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Install {
                name,
                font_dir,
                allow_unlisted,
            }) => {
                assert_eq!(name, "Envy Code R PR7");
                assert_eq!(font_dir, Some(PathBuf::from("/tmp/fonts")));
                assert!(allow_unlisted);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(cli.verbose);
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["fontbrowser", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Init { force: true }
            })
        ));
    }
}
