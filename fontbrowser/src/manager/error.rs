//! Error types for the font installation pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Errors that can occur while resolving, listing, downloading or placing fonts.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The host operating system has no known user font directory.
    #[error("unsupported operating system: {os}")]
    UnsupportedPlatform { os: String },

    /// An environment variable needed to locate the font directory is unset.
    #[error("environment variable {var} is not set")]
    MissingEnvironment { var: &'static str },

    /// Failed to create a directory.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// The package name cannot be used as a directory name.
    #[error("invalid package name: {name:?}")]
    InvalidPackageName { name: String },

    /// The remote listing endpoint has no directory for this package.
    #[error("package {package} not found at {url}")]
    PackageNotFound { package: String, url: String },

    /// The remote listing request failed or returned an unusable body.
    #[error("failed to list {url}: {reason}")]
    ListingFailed { url: String, reason: String },

    /// The listing request exceeded its timeout.
    ///
    /// A file download that times out is a [`ManagerError::FetchFailed`].
    #[error("listing request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// The listing contained no recognised font files.
    #[error("no font files found for {package}")]
    NoFontFiles { package: String },

    /// A single file could not be fetched.
    #[error("failed to download {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// Listed font files existed but none of them could be staged.
    #[error("none of the {attempted} font file(s) for {package} could be downloaded")]
    DownloadFailed { package: String, attempted: usize },

    /// Failed to write a file.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to copy a staged file into the font directory.
    #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Anything else.
    #[error("{0}")]
    Unexpected(String),
}

/// Coarse classification of a [`ManagerError`].
///
/// `Copy` so it can travel inside an [`InstallResult`](super::InstallResult)
/// to the presentation layer without owning the underlying I/O error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    UnsupportedPlatform,
    DirectoryCreation,
    InvalidPackageName,
    PackageNotFound,
    RemoteListing,
    NoFontFiles,
    Download,
    Copy,
    Unexpected,
}

impl ManagerError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnsupportedPlatform { .. } => FailureKind::UnsupportedPlatform,
            Self::MissingEnvironment { .. } | Self::CreateDirFailed { .. } => {
                FailureKind::DirectoryCreation
            }
            Self::InvalidPackageName { .. } => FailureKind::InvalidPackageName,
            Self::PackageNotFound { .. } => FailureKind::PackageNotFound,
            Self::ListingFailed { .. } | Self::Timeout { .. } => FailureKind::RemoteListing,
            Self::NoFontFiles { .. } => FailureKind::NoFontFiles,
            Self::FetchFailed { .. } | Self::DownloadFailed { .. } => FailureKind::Download,
            Self::WriteFailed { .. } | Self::CopyFailed { .. } => FailureKind::Copy,
            Self::HttpClient(_) | Self::Unexpected(_) => FailureKind::Unexpected,
        }
    }
}
