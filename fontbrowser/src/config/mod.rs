//! User configuration file.
//!
//! The configuration lives in an INI file at
//! `<config dir>/fontbrowser/config.ini`:
//!
//! ```ini
//! [repository]
//! owner = ProgrammingFonts
//! name = ProgrammingFonts
//! branch = master
//! font_path = font
//! api_url = https://api.github.com
//!
//! [network]
//! list_timeout_secs = 10
//! download_timeout_secs = 30
//!
//! [install]
//! font_dir =
//! temp_dir =
//! refresh_cache = true
//!
//! [logging]
//! level = info
//! file =
//! ```
//!
//! Every key is optional. A missing file yields the defaults, and an empty
//! value for a path key means "use the default location".

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::manager::RepositoryConfig;

const APP_DIR: &str = "fontbrowser";
const CONFIG_FILE: &str = "config.ini";
const LOG_FILE: &str = "fontbrowser.log";

/// Errors reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid value {value:?} for [{section}] {key}: expected {expected}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{} already exists", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("could not determine the user configuration directory")]
    NoConfigDir,
}

/// `[network]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSection {
    pub list_timeout_secs: u64,
    pub download_timeout_secs: u64,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            list_timeout_secs: crate::manager::DEFAULT_LIST_TIMEOUT.as_secs(),
            download_timeout_secs: crate::manager::DEFAULT_DOWNLOAD_TIMEOUT.as_secs(),
        }
    }
}

/// `[install]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSection {
    /// Replaces the platform font directory when set.
    pub font_dir: Option<PathBuf>,
    /// Parent of staging directories; system temp dir when unset.
    pub temp_dir: Option<PathBuf>,
    pub refresh_cache: bool,
}

impl Default for InstallSection {
    fn default() -> Self {
        Self {
            font_dir: None,
            temp_dir: None,
            refresh_cache: true,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSection {
    /// Filter directive, e.g. `info` or `fontbrowser=debug`.
    pub level: String,
    /// Log file used by the interactive browser.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingSection {
    /// The configured log file, or the default under the cache directory.
    pub fn file_or_default(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_log_file)
    }
}

/// The parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub repository: RepositoryConfig,
    pub network: NetworkSection,
    pub install: InstallSection,
    pub logging: LoggingSection,
}

impl ConfigFile {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let ini = Ini::load_from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_ini(&ini)
    }

    /// Build a configuration from parsed INI data.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("repository")) {
            let repo = &mut config.repository;
            for (key, slot) in [
                ("owner", &mut repo.owner),
                ("name", &mut repo.name),
                ("branch", &mut repo.branch),
                ("font_path", &mut repo.font_path),
                ("api_url", &mut repo.api_url),
            ] {
                if let Some(v) = non_empty(section.get(key)) {
                    *slot = v.to_string();
                }
            }
        }

        if let Some(section) = ini.section(Some("network")) {
            if let Some(v) = non_empty(section.get("list_timeout_secs")) {
                config.network.list_timeout_secs = parse_secs("list_timeout_secs", v)?;
            }
            if let Some(v) = non_empty(section.get("download_timeout_secs")) {
                config.network.download_timeout_secs = parse_secs("download_timeout_secs", v)?;
            }
        }

        if let Some(section) = ini.section(Some("install")) {
            config.install.font_dir = non_empty(section.get("font_dir")).map(PathBuf::from);
            config.install.temp_dir = non_empty(section.get("temp_dir")).map(PathBuf::from);
            if let Some(v) = non_empty(section.get("refresh_cache")) {
                config.install.refresh_cache = parse_bool("install", "refresh_cache", v)?;
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(v) = non_empty(section.get("level")) {
                config.logging.level = v.to_string();
            }
            config.logging.file = non_empty(section.get("file")).map(PathBuf::from);
        }

        Ok(config)
    }

    /// Render as INI data, every key included.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        let path_value = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };

        ini.with_section(Some("repository"))
            .set("owner", self.repository.owner.as_str())
            .set("name", self.repository.name.as_str())
            .set("branch", self.repository.branch.as_str())
            .set("font_path", self.repository.font_path.as_str())
            .set("api_url", self.repository.api_url.as_str());

        ini.with_section(Some("network"))
            .set("list_timeout_secs", self.network.list_timeout_secs.to_string())
            .set(
                "download_timeout_secs",
                self.network.download_timeout_secs.to_string(),
            );

        ini.with_section(Some("install"))
            .set("font_dir", path_value(&self.install.font_dir))
            .set("temp_dir", path_value(&self.install.temp_dir))
            .set("refresh_cache", self.install.refresh_cache.to_string());

        ini.with_section(Some("logging"))
            .set("level", self.logging.level.as_str())
            .set("file", path_value(&self.logging.file));

        ini
    }

    /// Write the full configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut buf = Vec::new();
        self.to_ini().write_to(&mut buf).map_err(write_err)?;
        fs::write(path, buf).map_err(write_err)?;

        tracing::info!(path = %path.display(), "Wrote configuration");
        Ok(())
    }

    /// Write the defaults to `path`, refusing to replace an existing file
    /// unless `force` is set.
    pub fn init_at(path: &Path, force: bool) -> Result<Self, ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }
}

/// `<config dir>/fontbrowser/config.ini`, if a config dir exists.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

/// `<cache dir>/fontbrowser/fontbrowser.log`, or the temp dir.
pub fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join(LOG_FILE)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| ConfigError::InvalidValue {
            section: "network",
            key,
            value: value.to_string(),
            expected: "a positive number of seconds",
        })
}

fn parse_bool(section: &'static str, key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            section,
            key,
            value: value.to_string(),
            expected: "true or false",
        }),
    }
}
