//! Deferred Code Assets
//!
//! A code component renders a placeholder; the file body arrives later
//! through `DeferredAssetLoader`. This module holds the asset description
//! and the path rules shared with the download link.

pub mod fetcher;
pub mod loader;

use serde::Serialize;

pub use fetcher::{AssetFetcher, SiteRootFetcher, StaticFetcher};
pub use loader::{DeferredAssetLoader, LoadState, SyntaxHighlighter};

/// Display name used when a path has no usable last segment.
pub const DEFAULT_FILE_NAME: &str = "code.txt";

/// Strip a leading `./` and make the path site-root absolute. Paths that are
/// already `/`-rooted or start with `http` are left alone.
pub fn normalize_asset_path(path: &str) -> String {
    let path = path.strip_prefix("./").unwrap_or(path);
    if path.starts_with('/') || path.starts_with("http") {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Last path segment, split on `/` or `\`.
pub fn file_name(path: &str) -> String {
    match path.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_FILE_NAME.to_string(),
    }
}

/// An external text file to load into a rendered code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeferredCodeAsset {
    /// Path as written in the component data.
    pub source_path: String,
    /// Site-root absolute path actually fetched.
    pub fetch_path: String,
    pub file_name: String,
    /// Id of the `<code>` element that receives the text.
    pub content_id: String,
    /// Id of the loading indicator, `loader-{content_id}`.
    pub loader_id: String,
}

impl DeferredCodeAsset {
    pub fn new(source_path: &str, content_id: impl Into<String>) -> Self {
        let content_id = content_id.into();
        Self {
            source_path: source_path.to_string(),
            fetch_path: normalize_asset_path(source_path),
            file_name: file_name(source_path),
            loader_id: format!("loader-{}", content_id),
            content_id,
        }
    }

    /// Placeholder shown in place of the file when loading fails.
    pub fn error_placeholder(&self, reason: &str) -> String {
        format!(
            "// Error: Could not load file {}\n// {}",
            self.file_name, reason
        )
    }
}
