//! Font package installer.
//!
//! This module orchestrates the installation workflow:
//! 1. Resolve the font directory and create `<font dir>/<package>`
//! 2. List the package and download its font files into a staging area
//! 3. Copy the staged files into the package directory
//! 4. Refresh the font cache (Linux only, best effort)
//!
//! Each stage is a hard gate. [`FontInstaller::try_install`] reports the
//! first failure as a [`ManagerError`]; [`FontInstaller::install`]
//! normalises every outcome, panics included, into an [`InstallResult`].

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use super::config::ManagerConfig;
use super::download::{HttpFetcher, StagingDownloader};
use super::error::{FailureKind, ManagerError, ManagerResult};
use super::listing::GitHubLister;
use super::naming::is_safe_component;
use super::refresh::{FcCacheRefresher, NoopRefresher};
use super::staging::{StagedFile, StagingArea};
use super::traits::{CacheRefresher, DirectoryLister, FileFetcher};
use crate::platform::PlatformPathResolver;

/// Progress callback for installation operations.
///
/// # Arguments
///
/// * `stage` - Stage being entered
/// * `message` - Human-readable message
pub type InstallProgressCallback = Box<dyn Fn(InstallStage, &str) + Send + Sync>;

/// Installation stages for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    /// Resolving and creating the target directory.
    Resolving,
    /// Querying the remote listing.
    Listing,
    /// Downloading font files into the staging area.
    Downloading,
    /// Copying staged files into the font directory.
    Placing,
    /// Rebuilding the OS font cache.
    RefreshingCache,
    /// Installation complete.
    Complete,
}

impl InstallStage {
    /// Get a human-readable name for the stage.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resolving => "Resolving",
            Self::Listing => "Listing",
            Self::Downloading => "Downloading",
            Self::Placing => "Installing",
            Self::RefreshingCache => "Refreshing font cache",
            Self::Complete => "Complete",
        }
    }
}

/// What a successful install produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub package: String,
    /// `<font dir>/<package>`.
    pub install_dir: PathBuf,
    /// Placed files, in listing order.
    pub files: Vec<PathBuf>,
}

/// Outcome of an install attempt, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    pub success: bool,
    pub message: String,
    /// Why the install failed, when it did.
    pub failure: Option<FailureKind>,
    /// Placed files on success.
    pub files: Vec<PathBuf>,
}

impl InstallResult {
    pub fn from_report(report: InstallReport) -> Self {
        Self {
            success: true,
            message: format!(
                "Successfully installed {} font file(s)",
                report.files.len()
            ),
            failure: None,
            files: report.files,
        }
    }

    pub fn from_error(err: &ManagerError) -> Self {
        let kind = err.kind();
        let message = match kind {
            FailureKind::UnsupportedPlatform | FailureKind::DirectoryCreation => {
                format!("directory error: {}", err)
            }
            FailureKind::PackageNotFound | FailureKind::RemoteListing | FailureKind::Download => {
                "Failed to download font files".to_string()
            }
            FailureKind::NoFontFiles => "No font files found".to_string(),
            FailureKind::InvalidPackageName | FailureKind::Copy | FailureKind::Unexpected => {
                format!("Installation error: {}", err)
            }
        };

        Self {
            success: false,
            message,
            failure: Some(kind),
            files: Vec::new(),
        }
    }
}

impl From<ManagerResult<InstallReport>> for InstallResult {
    fn from(result: ManagerResult<InstallReport>) -> Self {
        match result {
            Ok(report) => Self::from_report(report),
            Err(e) => Self::from_error(&e),
        }
    }
}

/// Font package installer.
///
/// Generic over the listing and fetching seams; [`FontInstaller::from_config`]
/// builds the HTTP-backed production installer.
pub struct FontInstaller<L = GitHubLister, F = HttpFetcher> {
    resolver: PlatformPathResolver,
    lister: L,
    downloader: StagingDownloader<F>,
    /// Parent directory for staging areas; system temp dir when `None`.
    staging_root: Option<PathBuf>,
    refresher: Box<dyn CacheRefresher>,
}

impl FontInstaller<GitHubLister, HttpFetcher> {
    /// Build an installer that talks to the configured repository.
    pub fn from_config(config: &ManagerConfig) -> ManagerResult<Self> {
        let resolver =
            PlatformPathResolver::from_process().with_override(config.install_dir.clone());
        let lister = GitHubLister::new(config.repository.clone(), config.list_timeout)?;
        let fetcher = HttpFetcher::new(config.download_timeout)?;

        let installer = Self::new(resolver, lister, fetcher)
            .with_staging_root(config.staging_dir.clone());

        Ok(if config.refresh_font_cache {
            installer
        } else {
            installer.with_cache_refresher(NoopRefresher)
        })
    }
}

impl<L: DirectoryLister, F: FileFetcher> FontInstaller<L, F> {
    /// Create an installer from its collaborators.
    ///
    /// The cache refresher defaults to `fc-cache`.
    pub fn new(resolver: PlatformPathResolver, lister: L, fetcher: F) -> Self {
        Self {
            resolver,
            lister,
            downloader: StagingDownloader::new(fetcher),
            staging_root: None,
            refresher: Box::new(FcCacheRefresher::default()),
        }
    }

    /// Stage downloads under `root` instead of the system temp dir.
    pub fn with_staging_root(mut self, root: Option<PathBuf>) -> Self {
        self.staging_root = root;
        self
    }

    pub fn with_cache_refresher(mut self, refresher: impl CacheRefresher + 'static) -> Self {
        self.refresher = Box::new(refresher);
        self
    }

    pub fn resolver(&self) -> &PlatformPathResolver {
        &self.resolver
    }

    pub fn lister(&self) -> &L {
        &self.lister
    }

    /// Install `package`, never failing.
    pub fn install(&self, package: &str) -> InstallResult {
        self.install_guarded(package, None)
    }

    /// Install `package`, reporting each stage to `on_progress`.
    pub fn install_with_progress(
        &self,
        package: &str,
        on_progress: InstallProgressCallback,
    ) -> InstallResult {
        self.install_guarded(package, Some(&on_progress))
    }

    /// Install `package`, returning the first stage failure.
    pub fn try_install(&self, package: &str) -> ManagerResult<InstallReport> {
        self.run_pipeline(package, None)
    }

    fn install_guarded(
        &self,
        package: &str,
        on_progress: Option<&InstallProgressCallback>,
    ) -> InstallResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_pipeline(package, on_progress)
        }));

        match outcome {
            Ok(Ok(report)) => InstallResult::from_report(report),
            Ok(Err(e)) => {
                tracing::warn!(package, kind = ?e.kind(), error = %e, "Installation failed");
                InstallResult::from_error(&e)
            }
            Err(payload) => {
                let description = panic_description(payload.as_ref());
                tracing::error!(package, %description, "Installation panicked");
                InstallResult::from_error(&ManagerError::Unexpected(description))
            }
        }
    }

    fn run_pipeline(
        &self,
        package: &str,
        on_progress: Option<&InstallProgressCallback>,
    ) -> ManagerResult<InstallReport> {
        let report = |stage: InstallStage, message: &str| {
            if let Some(cb) = on_progress {
                cb(stage, message);
            }
        };

        if !is_safe_component(package) {
            return Err(ManagerError::InvalidPackageName {
                name: package.to_string(),
            });
        }

        // Stage 1: Resolve
        report(InstallStage::Resolving, "Resolving font directory...");
        let font_dir = self.resolver.resolve()?;
        let install_dir = font_dir.join(package);
        fs::create_dir_all(&install_dir).map_err(|e| ManagerError::CreateDirFailed {
            path: install_dir.clone(),
            source: e,
        })?;

        // Stage 2: List + fetch, inside one staging area
        let staging = StagingArea::create(self.staging_root.as_deref())?;

        report(InstallStage::Listing, &format!("Listing {}...", package));
        let entries = self.lister.list(package)?;
        if entries.is_empty() {
            return Err(ManagerError::NoFontFiles {
                package: package.to_string(),
            });
        }

        report(
            InstallStage::Downloading,
            &format!("Downloading {} font file(s)...", entries.len()),
        );
        let staged = self.downloader.stage(package, &entries, &staging)?;

        // Stage 3: Place
        report(
            InstallStage::Placing,
            &format!("Installing {} font file(s)...", staged.len()),
        );
        let files = place_files(&staged, &install_dir)?;

        if let Err(e) = staging.close() {
            tracing::warn!(error = %e, "Failed to remove staging area");
        }

        // Stage 4: Refresh
        if self.should_refresh_cache() {
            report(InstallStage::RefreshingCache, "Refreshing font cache...");
            self.refresher.refresh();
        }

        report(InstallStage::Complete, "Installation complete");
        tracing::info!(
            package,
            files = files.len(),
            dir = %install_dir.display(),
            "Installed font package"
        );

        Ok(InstallReport {
            package: package.to_string(),
            install_dir,
            files,
        })
    }

    fn should_refresh_cache(&self) -> bool {
        self.resolver
            .platform()
            .map(|p| p.refreshes_font_cache())
            .unwrap_or(false)
    }
}

/// Copy staged files into `install_dir`, overwriting same-named files.
fn place_files(staged: &[StagedFile], install_dir: &Path) -> ManagerResult<Vec<PathBuf>> {
    staged
        .iter()
        .map(|file| {
            let dest = install_dir.join(&file.name);
            fs::copy(&file.path, &dest).map_err(|e| ManagerError::CopyFailed {
                from: file.path.clone(),
                to: dest.clone(),
                source: e,
            })?;
            Ok(dest)
        })
        .collect()
}

fn panic_description(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_install_stage_name() {
        assert_eq!(InstallStage::Resolving.name(), "Resolving");
        assert_eq!(InstallStage::Listing.name(), "Listing");
        assert_eq!(InstallStage::Downloading.name(), "Downloading");
        assert_eq!(InstallStage::Placing.name(), "Installing");
        assert_eq!(InstallStage::RefreshingCache.name(), "Refreshing font cache");
        assert_eq!(InstallStage::Complete.name(), "Complete");
    }

    #[test]
    fn test_result_messages() {
        let not_found = ManagerError::PackageNotFound {
            package: "x".to_string(),
            url: "u".to_string(),
        };
        assert_eq!(
            InstallResult::from_error(&not_found).message,
            "Failed to download font files"
        );

        let empty = ManagerError::NoFontFiles {
            package: "x".to_string(),
        };
        assert_eq!(
            InstallResult::from_error(&empty).message,
            "No font files found"
        );

        let unsupported = ManagerError::UnsupportedPlatform {
            os: "haiku".to_string(),
        };
        let result = InstallResult::from_error(&unsupported);
        assert!(result.message.starts_with("directory error"));
        assert_eq!(result.failure, Some(FailureKind::UnsupportedPlatform));

        let unexpected = ManagerError::Unexpected("boom".to_string());
        assert_eq!(
            InstallResult::from_error(&unexpected).message,
            "Installation error: boom"
        );
    }

    #[test]
    fn test_success_message_counts_files() {
        let report = InstallReport {
            package: "Hack".to_string(),
            install_dir: PathBuf::from("/fonts/Hack"),
            files: vec![PathBuf::from("/fonts/Hack/a.ttf")],
        };
        let result = InstallResult::from(Ok(report));
        assert!(result.success);
        assert_eq!(result.message, "Successfully installed 1 font file(s)");
        assert!(result.failure.is_none());
    }

    #[test]
    fn test_place_files_overwrites() {
        let staging = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();

        let src = staging.path().join("a.ttf");
        fs::write(&src, b"new").unwrap();
        fs::write(target.path().join("a.ttf"), b"old").unwrap();

        let staged = vec![StagedFile {
            name: "a.ttf".to_string(),
            path: src,
            size: 3,
        }];
        let placed = place_files(&staged, target.path()).unwrap();

        assert_eq!(placed, vec![target.path().join("a.ttf")]);
        assert_eq!(fs::read(target.path().join("a.ttf")).unwrap(), b"new");
    }

    #[test]
    fn test_place_files_copy_failure() {
        let target = TempDir::new().unwrap();
        let staged = vec![StagedFile {
            name: "gone.ttf".to_string(),
            path: target.path().join("does-not-exist"),
            size: 0,
        }];
        assert!(matches!(
            place_files(&staged, target.path()),
            Err(ManagerError::CopyFailed { .. })
        ));
    }

    #[test]
    fn test_panic_description() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_description(payload.as_ref()), "static message");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_description(payload.as_ref()), "owned message");

        let payload: Box<dyn Any + Send> = Box::new(7u32);
        assert_eq!(panic_description(payload.as_ref()), "unknown panic");
    }
}
