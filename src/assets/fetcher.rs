//! Asset fetching: plain GET of a site-root path, as text.

use std::future::Future;
use std::path::{Component as PathComponent, PathBuf};
use std::sync::{Mutex, PoisonError};

use rustc_hash::FxHashMap;

use crate::error::FetchError;

/// Text fetch of a site-root-absolute path (`/assets/code/a.js`).
pub trait AssetFetcher: Send + Sync + 'static {
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Serves files from a directory standing in for the web root.
#[derive(Debug, Clone)]
pub struct SiteRootFetcher {
    root: PathBuf,
}

impl SiteRootFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Map a URL path onto the root. Remote URLs and `..` are refused.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Err(FetchError::Remote(path.to_string()));
        }
        // query strings and fragments never name a file
        let path = path.split(['?', '#']).next().unwrap_or_default();

        let relative = PathBuf::from(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for part in relative.components() {
            match part {
                PathComponent::Normal(segment) => resolved.push(segment),
                PathComponent::CurDir => {}
                _ => return Err(FetchError::InvalidPath(path.to_string())),
            }
        }
        Ok(resolved)
    }
}

impl AssetFetcher for SiteRootFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let file = self.resolve(path)?;
        tracing::debug!("Loading asset {} from {}", path, file.display());
        match tokio::fs::read_to_string(&file).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FetchError::not_found()),
            Err(e) => Err(FetchError::Io(e)),
        }
    }
}

/// Fixed path → body table. Unknown paths answer `HTTP 404: Not Found`.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    files: Mutex<FxHashMap<String, String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, body: &str) -> Self {
        self.insert(path, body);
        self
    }

    /// Add or replace a file; later fetches see the new body.
    pub fn insert(&self, path: &str, body: &str) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), body.to_string());
    }
}

impl AssetFetcher for StaticFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let body = self
            .files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned();
        body.ok_or_else(FetchError::not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_site_root_fetch() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.js"), "const x=1;").unwrap();

        let fetcher = SiteRootFetcher::new(dir.path());
        assert_eq!(fetcher.fetch_text("/src/a.js").await.unwrap(), "const x=1;");

        let err = fetcher.fetch_text("/src/missing.js").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_resolve_refuses_traversal_and_remote() {
        let fetcher = SiteRootFetcher::new("/srv/site");
        assert!(matches!(
            fetcher.resolve("/../etc/passwd"),
            Err(FetchError::InvalidPath(_))
        ));
        assert!(matches!(
            fetcher.resolve("https://cdn.dev/x.js"),
            Err(FetchError::Remote(_))
        ));
        assert_eq!(
            fetcher.resolve("/assets/data/modul1.json?v=2").unwrap(),
            PathBuf::from("/srv/site/assets/data/modul1.json")
        );
    }

    #[tokio::test]
    async fn test_static_fetcher() {
        let fetcher = StaticFetcher::new().with_file("/a.txt", "A");
        assert_eq!(fetcher.fetch_text("/a.txt").await.unwrap(), "A");
        assert!(fetcher.fetch_text("/b.txt").await.is_err());
    }
}
