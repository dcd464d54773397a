//! Per-install temporary staging directory.
//!
//! A [`StagingArea`] owns a fresh temporary directory for the lifetime of a
//! single install. Dropping it deletes the directory and everything staged
//! in it, whichever way the install exits.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::error::{ManagerError, ManagerResult};

const STAGING_PREFIX: &str = "fontbrowser-";

/// A font file written into a staging area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Original file name from the listing.
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Scoped temporary directory, removed on drop.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    /// Create a staging directory under `root`, or the system temp dir.
    pub fn create(root: Option<&Path>) -> ManagerResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX);

        let dir = match root {
            Some(root) => {
                fs::create_dir_all(root).map_err(|e| ManagerError::CreateDirFailed {
                    path: root.to_path_buf(),
                    source: e,
                })?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
        .map_err(|e| ManagerError::CreateDirFailed {
            path: root.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir),
            source: e,
        })?;

        tracing::debug!(dir = %dir.path().display(), "Created staging area");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `bytes` to `<staging>/<name>`.
    pub fn write(&self, name: &str, bytes: &[u8]) -> ManagerResult<StagedFile> {
        let path = self.dir.path().join(name);
        fs::write(&path, bytes).map_err(|e| ManagerError::WriteFailed {
            path: path.clone(),
            source: e,
        })?;

        Ok(StagedFile {
            name: name.to_string(),
            path,
            size: bytes.len() as u64,
        })
    }

    /// Delete the staging directory now, reporting failures.
    pub fn close(self) -> ManagerResult<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|e| ManagerError::WriteFailed { path, source: e })
    }
}
