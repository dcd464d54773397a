//! Font package installation.
//!
//! Installing a package runs a fixed pipeline:
//!
//! 1. Resolve the platform font directory and create `<dir>/<package>`
//! 2. List the package in the remote repository
//! 3. Download each font file into a scoped staging directory
//! 4. Copy the staged files into place, overwriting existing ones
//! 5. Refresh the font cache on Linux
//!
//! The network and cache seams are traits ([`DirectoryLister`],
//! [`FileFetcher`], [`CacheRefresher`]) so the pipeline can be driven
//! without a network in tests.
//!
//! # Example
//!
//! ```ignore
//! use fontbrowser::manager::{FontInstaller, ManagerConfig};
//!
//! let installer = FontInstaller::from_config(&ManagerConfig::default())?;
//! let result = installer.install("Hack");
//! println!("{}", result.message);
//! ```

mod config;
mod download;
mod error;
mod installer;
mod listing;
mod naming;
mod refresh;
mod staging;
mod traits;

#[cfg(test)]
mod test_server;

pub use config::{
    ManagerConfig, RepositoryConfig, DEFAULT_API_URL, DEFAULT_DOWNLOAD_TIMEOUT,
    DEFAULT_FONT_PATH, DEFAULT_LIST_TIMEOUT, DEFAULT_REPOSITORY_BRANCH, DEFAULT_REPOSITORY_NAME,
    DEFAULT_REPOSITORY_OWNER,
};
pub use download::{HttpFetcher, StagingDownloader};
pub use error::{FailureKind, ManagerError, ManagerResult};
pub use installer::{
    FontInstaller, InstallProgressCallback, InstallReport, InstallResult, InstallStage,
};
pub use listing::{
    contents_url, is_font_file, parse_listing, EntryKind, GitHubLister, RemoteFileEntry,
    FONT_EXTENSIONS, USER_AGENT,
};
pub use naming::is_safe_component;
pub use refresh::{FcCacheRefresher, NoopRefresher};
pub use staging::{StagedFile, StagingArea};
pub use traits::{CacheRefresher, DirectoryLister, FileFetcher};
