//! Remote directory listing of a font package.
//!
//! Packages are directories in a GitHub repository. The contents API
//! returns a JSON array of entries:
//!
//! ```json
//! [{ "type": "file", "name": "Hack-Regular.ttf", "download_url": "https://..." }]
//! ```
//!
//! Only entries of type `file` with a recognised font extension are kept,
//! in the order the API returned them.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use super::config::RepositoryConfig;
use super::error::{ManagerError, ManagerResult};
use super::traits::DirectoryLister;

/// Font file extensions accepted from a listing (compared case-insensitively).
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "woff", "woff2", "ttc"];

/// User agent sent with every request; the contents API rejects anonymous clients.
pub const USER_AGENT: &str = concat!("fontbrowser/", env!("CARGO_PKG_VERSION"));

/// Kind of a listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks, submodules and anything newer.
    Other,
}

impl EntryKind {
    fn from_wire(kind: &str) -> Self {
        match kind {
            "file" => Self::File,
            "dir" => Self::Directory,
            _ => Self::Other,
        }
    }
}

/// A downloadable file in a package directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileEntry {
    pub name: String,
    pub download_url: String,
    pub kind: EntryKind,
}

impl RemoteFileEntry {
    pub fn file(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            download_url: download_url.into(),
            kind: EntryKind::File,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(default)]
    download_url: Option<String>,
}

/// Whether `name` ends in one of [`FONT_EXTENSIONS`].
pub fn is_font_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    FONT_EXTENSIONS.iter().any(|ext| {
        lower
            .strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.'))
    })
}

/// Parse a contents API response and keep the font files.
pub fn parse_listing(body: &str) -> serde_json::Result<Vec<RemoteFileEntry>> {
    let entries: Vec<ContentsEntry> = serde_json::from_str(body)?;

    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            let kind = EntryKind::from_wire(&entry.kind);
            if kind != EntryKind::File || !is_font_file(&entry.name) {
                return None;
            }
            let download_url = entry.download_url?;
            Some(RemoteFileEntry {
                name: entry.name,
                download_url,
                kind,
            })
        })
        .collect())
}

/// Build the contents API URL for `package`.
///
/// Every path segment is percent-encoded; package names contain spaces.
pub fn contents_url(repository: &RepositoryConfig, package: &str) -> ManagerResult<Url> {
    let invalid = |reason: String| ManagerError::ListingFailed {
        url: repository.api_url.clone(),
        reason,
    };

    let mut url = Url::parse(&repository.api_url).map_err(|e| invalid(e.to_string()))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| invalid("API URL cannot be a base".to_string()))?;
        segments.pop_if_empty().extend([
            "repos",
            repository.owner.as_str(),
            repository.name.as_str(),
            "contents",
        ]);
        segments.extend(repository.font_path.split('/').filter(|s| !s.is_empty()));
        segments.push(package);
    }
    url.query_pairs_mut().append_pair("ref", &repository.branch);

    Ok(url)
}

/// Lists packages through the GitHub contents API.
#[derive(Debug)]
pub struct GitHubLister {
    client: Client,
    repository: RepositoryConfig,
    timeout: Duration,
}

impl GitHubLister {
    pub fn new(repository: RepositoryConfig, timeout: Duration) -> ManagerResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ManagerError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            repository,
            timeout,
        })
    }

    pub fn repository(&self) -> &RepositoryConfig {
        &self.repository
    }
}

impl DirectoryLister for GitHubLister {
    fn list(&self, package: &str) -> ManagerResult<Vec<RemoteFileEntry>> {
        let url = contents_url(&self.repository, package)?;
        tracing::debug!(package, url = %url, "Listing package");

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github+json")
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ManagerError::Timeout {
                        url: url.to_string(),
                        timeout_secs: self.timeout.as_secs(),
                    }
                } else {
                    ManagerError::ListingFailed {
                        url: url.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ManagerError::PackageNotFound {
                package: package.to_string(),
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ManagerError::ListingFailed {
                url: url.to_string(),
                reason: format!("listing request failed with status {}", status),
            });
        }

        let body = response.text().map_err(|e| ManagerError::ListingFailed {
            url: url.to_string(),
            reason: format!("read error: {}", e),
        })?;

        let entries = parse_listing(&body).map_err(|e| ManagerError::ListingFailed {
            url: url.to_string(),
            reason: format!("malformed listing: {}", e),
        })?;

        tracing::info!(package, files = entries.len(), "Listed font files");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::error::FailureKind;
    use crate::manager::test_server::{serve_once, Reply};

    const LISTING: &str = r#"[
        {"type": "file", "name": "README.md", "download_url": "https://raw.example/README.md"},
        {"type": "file", "name": "Hack-Regular.TTF", "download_url": "https://raw.example/Hack-Regular.TTF"},
        {"type": "dir", "name": "web.woff", "download_url": null},
        {"type": "file", "name": "Hack-Bold.woff2", "download_url": "https://raw.example/Hack-Bold.woff2"},
        {"type": "file", "name": "broken.otf", "download_url": null},
        {"type": "symlink", "name": "link.ttf", "download_url": "https://raw.example/link.ttf"},
        {"type": "file", "name": "Hack.ttc", "download_url": "https://raw.example/Hack.ttc", "size": 10}
    ]"#;

    #[test]
    fn test_is_font_file() {
        assert!(is_font_file("a.ttf"));
        assert!(is_font_file("A.OTF"));
        assert!(is_font_file("a.woff"));
        assert!(is_font_file("a.woff2"));
        assert!(is_font_file("a.ttc"));
        assert!(!is_font_file("a.ttf.zip"));
        assert!(!is_font_file("ttf"));
        assert!(!is_font_file("a.pdf"));
        assert!(!is_font_file("notattf"));
    }

    #[test]
    fn test_parse_listing_keeps_fonts_in_order() {
        let entries = parse_listing(LISTING).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Hack-Regular.TTF", "Hack-Bold.woff2", "Hack.ttc"]);
        assert!(entries.iter().all(|e| e.kind == EntryKind::File));
        assert_eq!(entries[2].download_url, "https://raw.example/Hack.ttc");
    }

    #[test]
    fn test_parse_listing_rejects_non_array() {
        assert!(parse_listing(r#"{"message": "Not Found"}"#).is_err());
    }

    #[test]
    fn test_contents_url_encodes_segments() {
        let repo = RepositoryConfig::default();
        let url = contents_url(&repo, "Envy Code R PR7").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/ProgrammingFonts/ProgrammingFonts/contents/font/Envy%20Code%20R%20PR7?ref=master"
        );
    }

    #[test]
    fn test_contents_url_nested_font_path() {
        let repo = RepositoryConfig {
            font_path: "assets/fonts/".to_string(),
            api_url: "https://git.example.com/api/".to_string(),
            ..RepositoryConfig::default()
        };
        let url = contents_url(&repo, "Hack").unwrap();
        assert_eq!(
            url.as_str(),
            "https://git.example.com/api/repos/ProgrammingFonts/ProgrammingFonts/contents/assets/fonts/Hack?ref=master"
        );
    }

    #[test]
    fn test_contents_url_invalid_base() {
        let repo = RepositoryConfig {
            api_url: "not a url".to_string(),
            ..RepositoryConfig::default()
        };
        assert!(matches!(
            contents_url(&repo, "Hack"),
            Err(ManagerError::ListingFailed { .. })
        ));
    }

    #[test]
    fn test_github_lister_new() {
        let lister =
            GitHubLister::new(RepositoryConfig::default(), Duration::from_secs(10)).unwrap();
        assert_eq!(lister.repository().owner, "ProgrammingFonts");
        assert_eq!(lister.timeout, Duration::from_secs(10));
    }

    fn local_lister(reply: Reply, timeout: Duration) -> GitHubLister {
        let addr = serve_once(reply);
        let repository = RepositoryConfig {
            api_url: format!("http://{}", addr),
            ..RepositoryConfig::default()
        };
        GitHubLister::new(repository, timeout).unwrap()
    }

    #[test]
    fn test_list_over_http() {
        let lister = local_lister(Reply::new("200 OK", LISTING), Duration::from_secs(5));

        let entries = lister.list("Hack").unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "Hack-Regular.TTF");
    }

    #[test]
    fn test_list_missing_package() {
        let lister = local_lister(
            Reply::new("404 Not Found", r#"{"message": "Not Found"}"#),
            Duration::from_secs(5),
        );

        match lister.list("Nope") {
            Err(ManagerError::PackageNotFound { package, url }) => {
                assert_eq!(package, "Nope");
                assert!(url.ends_with("/contents/font/Nope?ref=master"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_list_server_error() {
        let lister = local_lister(
            Reply::new("503 Service Unavailable", ""),
            Duration::from_secs(5),
        );

        let err = lister.list("Hack").unwrap_err();
        assert!(matches!(err, ManagerError::ListingFailed { .. }));
        assert!(err.to_string().contains("503"));
        assert_eq!(err.kind(), FailureKind::RemoteListing);
    }

    #[test]
    fn test_list_object_body_is_malformed() {
        let lister = local_lister(
            Reply::new("200 OK", r#"{"message": "API rate limit exceeded"}"#),
            Duration::from_secs(5),
        );

        let err = lister.list("Hack").unwrap_err();
        assert!(matches!(err, ManagerError::ListingFailed { .. }));
        assert!(err.to_string().contains("malformed listing"));
    }

    #[test]
    fn test_list_timeout() {
        let lister = local_lister(
            Reply::new("200 OK", LISTING).delayed(Duration::from_secs(3)),
            Duration::from_millis(500),
        );

        let err = lister.list("Hack").unwrap_err();
        assert!(matches!(err, ManagerError::Timeout { .. }));
        assert_eq!(err.kind(), FailureKind::RemoteListing);
    }
}
