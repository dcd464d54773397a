//! Configuration management CLI commands.
//!
//! Provides `config init`, `config show`, and `config path` for creating
//! and inspecting the configuration file.

use clap::Subcommand;
use fontbrowser::config::ConfigFile;

use super::common::CommandContext;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with default settings
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, ctx: &CommandContext) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init { force } => run_init(ctx, force),
        ConfigCommands::Show => run_show(ctx),
        ConfigCommands::Path => run_path(ctx),
    }
}

/// Write the default configuration.
fn run_init(ctx: &CommandContext, force: bool) -> Result<(), CliError> {
    let path = ctx.require_config_path()?;
    ConfigFile::init_at(path, force).map_err(|e| {
        CliError::Config(format!("{}. Use --force to overwrite it.", e))
    })?;

    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Print every setting, with unset paths marked.
fn run_show(ctx: &CommandContext) -> Result<(), CliError> {
    let config = &ctx.config;

    println!("Configuration Settings");
    println!("======================");
    println!();

    match &ctx.config_path {
        Some(path) if path.exists() => println!("Loaded from {}", path.display()),
        _ => println!("Using defaults (no configuration file)"),
    }
    println!();

    let unset = |p: &Option<std::path::PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    };

    println!("[repository]");
    println!("  owner = {}", config.repository.owner);
    println!("  name = {}", config.repository.name);
    println!("  branch = {}", config.repository.branch);
    println!("  font_path = {}", config.repository.font_path);
    println!("  api_url = {}", config.repository.api_url);
    println!();
    println!("[network]");
    println!("  list_timeout_secs = {}", config.network.list_timeout_secs);
    println!(
        "  download_timeout_secs = {}",
        config.network.download_timeout_secs
    );
    println!();
    println!("[install]");
    println!("  font_dir = {}", unset(&config.install.font_dir));
    println!("  temp_dir = {}", unset(&config.install.temp_dir));
    println!("  refresh_cache = {}", config.install.refresh_cache);
    println!();
    println!("[logging]");
    println!("  level = {}", config.logging.level);
    println!("  file = {}", config.logging.file_or_default().display());

    Ok(())
}

/// Show the configuration file path.
fn run_path(ctx: &CommandContext) -> Result<(), CliError> {
    println!("{}", ctx.require_config_path()?.display());
    Ok(())
}
