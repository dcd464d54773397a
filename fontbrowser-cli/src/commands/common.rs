//! Common types and utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use fontbrowser::catalog::Catalog;
use fontbrowser::config::{self, ConfigFile};
use fontbrowser::manager::{FontInstaller, ManagerConfig};

use crate::error::CliError;

/// How many near matches to offer for an unknown package name.
const MAX_SUGGESTIONS: usize = 5;

/// Configuration shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// The file the configuration was (or would be) loaded from.
    pub config_path: Option<PathBuf>,
    pub config: ConfigFile,
}

impl CommandContext {
    /// Load the configuration from `explicit`, or the default location.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let config_path = explicit.map(Path::to_path_buf).or_else(config::default_path);
        let config = match &config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::default(),
        };
        Ok(Self {
            config_path,
            config,
        })
    }

    /// The configuration file path, failing when none can be determined.
    pub fn require_config_path(&self) -> Result<&Path, CliError> {
        self.config_path
            .as_deref()
            .ok_or_else(|| CliError::Config(config::ConfigError::NoConfigDir.to_string()))
    }

    /// Installer settings, with `font_dir` replacing the configured directory.
    pub fn manager_config(&self, font_dir: Option<PathBuf>) -> ManagerConfig {
        let config = ManagerConfig::from_config_file(&self.config);
        match font_dir {
            Some(dir) => config.with_install_dir(Some(dir)),
            None => config,
        }
    }

    /// Build the HTTP-backed installer.
    pub fn installer(&self, font_dir: Option<PathBuf>) -> Result<FontInstaller, CliError> {
        Ok(FontInstaller::from_config(&self.manager_config(font_dir))?)
    }
}

/// Catalog names close to `name`, for "did you mean" hints.
///
/// Tries the whole name first, then progressively shorter prefixes.
pub fn suggestions(catalog: &Catalog, name: &str) -> Vec<String> {
    let chars: Vec<char> = name.trim().chars().collect();
    let mut len = chars.len();

    while len >= 2 {
        let query: String = chars[..len].iter().collect();
        let matches = catalog.filter(&query);
        if !matches.is_empty() {
            return matches
                .into_iter()
                .take(MAX_SUGGESTIONS)
                .map(str::to_string)
                .collect();
        }
        len -= 1;
    }

    Vec::new()
}
