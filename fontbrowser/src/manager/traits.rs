//! Seams between the installer and the outside world.
//!
//! The installer depends only on these traits, so the pipeline can be
//! exercised against in-memory implementations.

use super::error::ManagerResult;
use super::listing::RemoteFileEntry;

/// Lists the installable font files of a package.
pub trait DirectoryLister: Send + Sync {
    /// Return the recognised font files of `package` in listing order.
    ///
    /// An empty vector means the package exists but ships no font files.
    fn list(&self, package: &str) -> ManagerResult<Vec<RemoteFileEntry>>;
}

/// Fetches the raw bytes behind a URL.
pub trait FileFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> ManagerResult<Vec<u8>>;
}

/// Rebuilds the operating system font cache after an install.
///
/// Implementations must not fail loudly: the outcome is never reported.
pub trait CacheRefresher: Send + Sync {
    fn refresh(&self);
}
