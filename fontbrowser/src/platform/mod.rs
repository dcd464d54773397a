//! Mapping from the host operating system to its per-user font directory.
//!
//! | Platform | Directory                                   |
//! |----------|---------------------------------------------|
//! | Linux    | `$HOME/.local/share/fonts`                  |
//! | Darwin   | `$HOME/Library/Fonts`                       |
//! | Windows  | `$LOCALAPPDATA/Microsoft/WindowsFonts`      |
//!
//! Any other OS is rejected with [`ManagerError::UnsupportedPlatform`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::manager::{ManagerError, ManagerResult};

/// Operating systems with a known user font directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
}

impl Platform {
    /// The platform this binary is running on.
    pub fn current() -> ManagerResult<Self> {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map an OS name as reported by `std::env::consts::OS`.
    pub fn from_os_name(os: &str) -> ManagerResult<Self> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::Darwin),
            "windows" => Ok(Self::Windows),
            other => Err(ManagerError::UnsupportedPlatform {
                os: other.to_string(),
            }),
        }
    }

    /// The user font directory for this platform.
    pub fn font_dir(&self, env: &PathEnv) -> ManagerResult<PathBuf> {
        match self {
            Self::Linux => Ok(env
                .require_home()?
                .join(".local")
                .join("share")
                .join("fonts")),
            Self::Darwin => Ok(env.require_home()?.join("Library").join("Fonts")),
            Self::Windows => Ok(env
                .local_app_data
                .as_deref()
                .ok_or(ManagerError::MissingEnvironment {
                    var: "LOCALAPPDATA",
                })?
                .join("Microsoft")
                .join("WindowsFonts")),
        }
    }

    /// Whether installs on this platform should rebuild the font cache.
    pub fn refreshes_font_cache(&self) -> bool {
        matches!(self, Self::Linux)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linux => "Linux",
            Self::Darwin => "macOS",
            Self::Windows => "Windows",
        };
        f.write_str(name)
    }
}

/// Environment state the font directory is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathEnv {
    /// The user's home directory.
    pub home: Option<PathBuf>,
    /// `%LOCALAPPDATA%` on Windows.
    pub local_app_data: Option<PathBuf>,
}

impl PathEnv {
    /// Read the environment of the current process.
    pub fn from_process() -> Self {
        Self {
            home: dirs::home_dir(),
            local_app_data: std::env::var_os("LOCALAPPDATA")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// An environment whose home and local app data both point at `root`.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            home: Some(root.clone()),
            local_app_data: Some(root),
        }
    }

    fn require_home(&self) -> ManagerResult<&Path> {
        self.home
            .as_deref()
            .ok_or(ManagerError::MissingEnvironment { var: "HOME" })
    }
}

/// Resolves, and creates, the directory fonts are installed into.
#[derive(Debug, Clone)]
pub struct PlatformPathResolver {
    os: String,
    env: PathEnv,
    override_dir: Option<PathBuf>,
}

impl Default for PlatformPathResolver {
    fn default() -> Self {
        Self::from_process()
    }
}

impl PlatformPathResolver {
    /// Resolver for the running process.
    pub fn from_process() -> Self {
        Self::new(std::env::consts::OS, PathEnv::from_process())
    }

    /// Resolver for an explicit OS name and environment.
    pub fn new(os: impl Into<String>, env: PathEnv) -> Self {
        Self {
            os: os.into(),
            env,
            override_dir: None,
        }
    }

    /// Install into `dir` instead of the platform directory.
    pub fn with_override(mut self, dir: Option<PathBuf>) -> Self {
        self.override_dir = dir;
        self
    }

    /// The OS name this resolver maps.
    pub fn os_name(&self) -> &str {
        &self.os
    }

    /// The platform, if the OS is supported.
    pub fn platform(&self) -> ManagerResult<Platform> {
        Platform::from_os_name(&self.os)
    }

    /// Compute the font directory without touching the filesystem.
    pub fn font_dir(&self) -> ManagerResult<PathBuf> {
        if let Some(dir) = &self.override_dir {
            return Ok(dir.clone());
        }
        self.platform()?.font_dir(&self.env)
    }

    /// Compute the font directory and make sure it exists.
    ///
    /// Creating an existing directory is a no-op, so this is idempotent.
    pub fn resolve(&self) -> ManagerResult<PathBuf> {
        let dir = self.font_dir()?;
        fs::create_dir_all(&dir).map_err(|e| ManagerError::CreateDirFailed {
            path: dir.clone(),
            source: e,
        })?;
        tracing::debug!(dir = %dir.display(), "Resolved font directory");
        Ok(dir)
    }
}
