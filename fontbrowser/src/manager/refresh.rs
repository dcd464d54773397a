//! Font cache refresh after an install.

use std::process::{Command, Stdio};

use super::traits::CacheRefresher;

/// Runs `fc-cache -f` in the background with its output discarded.
///
/// The child is reaped on a detached thread; its exit status is only
/// logged at debug level.
#[derive(Debug, Clone)]
pub struct FcCacheRefresher {
    program: String,
}

impl Default for FcCacheRefresher {
    fn default() -> Self {
        Self::new("fc-cache")
    }
}

impl FcCacheRefresher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CacheRefresher for FcCacheRefresher {
    fn refresh(&self) {
        let spawned = Command::new(&self.program)
            .arg("-f")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                let program = self.program.clone();
                std::thread::spawn(move || match child.wait() {
                    Ok(status) => {
                        tracing::debug!(%program, %status, "Font cache refresh finished")
                    }
                    Err(e) => {
                        tracing::debug!(%program, error = %e, "Font cache refresh wait failed")
                    }
                });
            }
            Err(e) => {
                tracing::debug!(
                    program = %self.program,
                    error = %e,
                    "Font cache refresh not started"
                );
            }
        }
    }
}

/// Does nothing. Used where no cache exists or refreshing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRefresher;

impl CacheRefresher for NoopRefresher {
    fn refresh(&self) {}
}
