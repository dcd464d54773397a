//! CLI error type.

use std::fmt;
use std::io;

use fontbrowser::config::ConfigError;
use fontbrowser::manager::ManagerError;

/// Errors surfaced to the user by the `fontbrowser` binary.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded or written.
    Config(String),
    /// The installer could not be constructed or a directory could not be resolved.
    Manager(ManagerError),
    /// Terminal or file I/O failed.
    Io(io::Error),
    /// The name is not in the catalog.
    UnknownPackage {
        name: String,
        suggestions: Vec<String>,
    },
    /// The install ran and reported a failure; the message was already printed.
    InstallFailed,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Manager(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::UnknownPackage { name, suggestions } => {
                write!(f, "'{}' is not in the font catalog", name)?;
                if !suggestions.is_empty() {
                    write!(f, ". Did you mean: {}?", suggestions.join(", "))?;
                }
                Ok(())
            }
            CliError::InstallFailed => write!(f, "Installation failed"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ManagerError> for CliError {
    fn from(e: ManagerError) -> Self {
        CliError::Manager(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
