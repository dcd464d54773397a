//! Fetching listed font files into a staging area.
//!
//! Each entry is fetched once with a bounded timeout. A failed entry is
//! logged and skipped; the batch only fails when nothing at all could be
//! staged. There are no retries, no range requests and no integrity checks.

use std::time::Duration;

use reqwest::blocking::Client;

use super::error::{ManagerError, ManagerResult};
use super::listing::{RemoteFileEntry, USER_AGENT};
use super::naming::is_safe_component;
use super::staging::{StagedFile, StagingArea};
use super::traits::FileFetcher;

/// Blocking HTTP fetcher.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    pub(crate) timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> ManagerResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ManagerError::HttpClient(e.to_string()))?;

        Ok(Self { client, timeout })
    }
}

impl FileFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> ManagerResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ManagerError::FetchFailed {
                url: url.to_string(),
                reason: if e.is_timeout() {
                    format!("timed out after {:?}", self.timeout)
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ManagerError::FetchFailed {
                url: url.to_string(),
                reason: format!("GET request failed with status {}", status),
            });
        }

        let bytes = response.bytes().map_err(|e| ManagerError::FetchFailed {
            url: url.to_string(),
            reason: if e.is_timeout() {
                format!("timed out after {:?}", self.timeout)
            } else {
                format!("read error: {}", e)
            },
        })?;

        Ok(bytes.to_vec())
    }
}

/// Downloads listing entries into a [`StagingArea`].
#[derive(Debug)]
pub struct StagingDownloader<F> {
    fetcher: F,
}

impl<F: FileFetcher> StagingDownloader<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Stage every entry that can be fetched, keeping listing order.
    ///
    /// Fails with [`ManagerError::DownloadFailed`] only when zero files
    /// were staged.
    pub fn stage(
        &self,
        package: &str,
        entries: &[RemoteFileEntry],
        area: &StagingArea,
    ) -> ManagerResult<Vec<StagedFile>> {
        let mut staged = Vec::with_capacity(entries.len());

        for entry in entries {
            if !is_safe_component(&entry.name) {
                tracing::warn!(package, name = %entry.name, "Skipping file with unsafe name");
                continue;
            }

            let result = self
                .fetcher
                .fetch(&entry.download_url)
                .and_then(|bytes| area.write(&entry.name, &bytes));

            match result {
                Ok(file) => {
                    tracing::debug!(
                        package,
                        name = %file.name,
                        bytes = file.size,
                        "Staged font file"
                    );
                    staged.push(file);
                }
                Err(e) => {
                    tracing::warn!(package, name = %entry.name, error = %e, "Skipping font file");
                }
            }
        }

        if staged.is_empty() {
            return Err(ManagerError::DownloadFailed {
                package: package.to_string(),
                attempted: entries.len(),
            });
        }

        Ok(staged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::error::FailureKind;
    use crate::manager::test_server::{serve_once, Reply};
    use std::collections::HashMap;

    struct MapFetcher(HashMap<String, Vec<u8>>);

    impl FileFetcher for MapFetcher {
        fn fetch(&self, url: &str) -> ManagerResult<Vec<u8>> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| ManagerError::FetchFailed {
                    url: url.to_string(),
                    reason: "404".to_string(),
                })
        }
    }

    fn fetcher(urls: &[(&str, &[u8])]) -> MapFetcher {
        MapFetcher(
            urls.iter()
                .map(|(u, b)| (u.to_string(), b.to_vec()))
                .collect(),
        )
    }

    #[test]
    fn test_http_fetcher_new() {
        let fetcher = HttpFetcher::new(Duration::from_secs(30)).unwrap();
        assert_eq!(fetcher.timeout.as_secs(), 30);
    }

    #[test]
    fn test_stage_skips_failures() {
        let downloader =
            StagingDownloader::new(fetcher(&[("u1", &b"one"[..]), ("u3", &b"three"[..])]));
        let area = StagingArea::create(None).unwrap();
        let entries = vec![
            RemoteFileEntry::file("a.ttf", "u1"),
            RemoteFileEntry::file("b.ttf", "u2"),
            RemoteFileEntry::file("c.otf", "u3"),
        ];

        let staged = downloader.stage("pkg", &entries, &area).unwrap();
        let names: Vec<_> = staged.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.ttf", "c.otf"]);
        assert_eq!(std::fs::read(area.path().join("c.otf")).unwrap(), b"three");
    }

    #[test]
    fn test_stage_fails_when_nothing_staged() {
        let downloader = StagingDownloader::new(fetcher(&[]));
        let area = StagingArea::create(None).unwrap();
        let entries = vec![RemoteFileEntry::file("a.ttf", "u1")];

        let err = downloader.stage("pkg", &entries, &area).unwrap_err();
        assert!(matches!(
            err,
            ManagerError::DownloadFailed { attempted: 1, .. }
        ));
    }

    #[test]
    fn test_stage_rejects_unsafe_names() {
        let downloader =
            StagingDownloader::new(fetcher(&[("u1", &b"evil"[..]), ("u2", &b"ok"[..])]));
        let area = StagingArea::create(None).unwrap();
        let entries = vec![
            RemoteFileEntry::file("../escape.ttf", "u1"),
            RemoteFileEntry::file("fine.ttf", "u2"),
        ];

        let staged = downloader.stage("pkg", &entries, &area).unwrap();
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].name, "fine.ttf");
    }

    #[test]
    fn test_http_fetcher_returns_body() {
        let addr = serve_once(Reply::new("200 OK", &b"\x00\x01font"[..]));
        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();

        let bytes = fetcher.fetch(&format!("http://{}/a.ttf", addr)).unwrap();
        assert_eq!(bytes, b"\x00\x01font");
    }

    #[test]
    fn test_http_fetcher_error_status() {
        let addr = serve_once(Reply::new("500 Internal Server Error", "oops"));
        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();

        let err = fetcher.fetch(&format!("http://{}/a.ttf", addr)).unwrap_err();
        assert!(matches!(err, ManagerError::FetchFailed { .. }));
        assert!(err.to_string().contains("500"));
        assert_eq!(err.kind(), FailureKind::Download);
    }

    #[test]
    fn test_http_fetcher_timeout_is_a_download_failure() {
        let addr = serve_once(Reply::new("200 OK", "late").delayed(Duration::from_secs(3)));
        let fetcher = HttpFetcher::new(Duration::from_millis(500)).unwrap();

        let err = fetcher.fetch(&format!("http://{}/a.ttf", addr)).unwrap_err();
        assert!(matches!(err, ManagerError::FetchFailed { .. }));
        assert_eq!(err.kind(), FailureKind::Download);
    }
}
