//! Configuration for the font installer.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigFile;

/// Default owner of the font repository.
pub const DEFAULT_REPOSITORY_OWNER: &str = "ProgrammingFonts";

/// Default name of the font repository.
pub const DEFAULT_REPOSITORY_NAME: &str = "ProgrammingFonts";

/// Default branch packages are listed from.
pub const DEFAULT_REPOSITORY_BRANCH: &str = "master";

/// Directory inside the repository holding one folder per package.
pub const DEFAULT_FONT_PATH: &str = "font";

/// Base URL of the directory-listing API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Timeout for the listing request.
pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for each font file download.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Where font packages are listed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub owner: String,
    pub name: String,
    pub branch: String,
    /// Path of the package directory inside the repository.
    pub font_path: String,
    pub api_url: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_REPOSITORY_OWNER.to_string(),
            name: DEFAULT_REPOSITORY_NAME.to_string(),
            branch: DEFAULT_REPOSITORY_BRANCH.to_string(),
            font_path: DEFAULT_FONT_PATH.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl RepositoryConfig {
    /// `owner/name` label.
    pub fn label(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Settings for building a [`FontInstaller`](super::FontInstaller).
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    pub repository: RepositoryConfig,

    /// Install here instead of the platform font directory.
    pub install_dir: Option<PathBuf>,

    /// Parent of the per-install staging directories.
    ///
    /// `None` uses the system temporary directory.
    pub staging_dir: Option<PathBuf>,

    pub list_timeout: Duration,

    pub download_timeout: Duration,

    /// Rebuild the font cache after installing on Linux.
    pub refresh_font_cache: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig::default(),
            install_dir: None,
            staging_dir: None,
            list_timeout: DEFAULT_LIST_TIMEOUT,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            refresh_font_cache: true,
        }
    }
}

impl ManagerConfig {
    /// Translate the user's configuration file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            repository: config.repository.clone(),
            install_dir: config.install.font_dir.clone(),
            staging_dir: config.install.temp_dir.clone(),
            list_timeout: Duration::from_secs(config.network.list_timeout_secs),
            download_timeout: Duration::from_secs(config.network.download_timeout_secs),
            refresh_font_cache: config.install.refresh_cache,
        }
    }

    pub fn with_repository(mut self, repository: RepositoryConfig) -> Self {
        self.repository = repository;
        self
    }

    pub fn with_install_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.install_dir = dir;
        self
    }

    pub fn with_staging_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.staging_dir = dir;
        self
    }

    pub fn with_timeouts(mut self, list: Duration, download: Duration) -> Self {
        self.list_timeout = list;
        self.download_timeout = download;
        self
    }

    pub fn with_refresh_font_cache(mut self, refresh: bool) -> Self {
        self.refresh_font_cache = refresh;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ManagerConfig::default();
        assert_eq!(config.repository.label(), "ProgrammingFonts/ProgrammingFonts");
        assert_eq!(config.repository.branch, "master");
        assert_eq!(config.list_timeout, Duration::from_secs(10));
        assert_eq!(config.download_timeout, Duration::from_secs(30));
        assert!(config.install_dir.is_none());
        assert!(config.refresh_font_cache);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ManagerConfig::default()
            .with_install_dir(Some(PathBuf::from("/custom/fonts")))
            .with_staging_dir(Some(PathBuf::from("/custom/tmp")))
            .with_timeouts(Duration::from_secs(5), Duration::from_secs(60))
            .with_refresh_font_cache(false);

        assert_eq!(config.install_dir, Some(PathBuf::from("/custom/fonts")));
        assert_eq!(config.staging_dir, Some(PathBuf::from("/custom/tmp")));
        assert_eq!(config.list_timeout, Duration::from_secs(5));
        assert_eq!(config.download_timeout, Duration::from_secs(60));
        assert!(!config.refresh_font_cache);
    }

    #[test]
    fn test_from_config_file() {
        let mut file = ConfigFile::default();
        file.network.list_timeout_secs = 3;
        file.install.refresh_cache = false;
        file.install.font_dir = Some(PathBuf::from("/srv/fonts"));

        let config = ManagerConfig::from_config_file(&file);
        assert_eq!(config.list_timeout, Duration::from_secs(3));
        assert!(!config.refresh_font_cache);
        assert_eq!(config.install_dir, Some(PathBuf::from("/srv/fonts")));
    }
}
