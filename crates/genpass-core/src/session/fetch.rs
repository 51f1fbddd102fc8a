//! Fetching the latest bookmarklet asset.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Source of bookmarklet assets.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<String>;
}

/// Reads assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetFetcher for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<String> {
        let path = self.root.join(location);
        let asset = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("read bookmarklet asset: {}", path.display()))?;
        Ok(asset.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("bookmarklet")).unwrap();
        std::fs::write(
            dir.path().join("bookmarklet/bookmarklet.min.js"),
            "javascript:void(0)\n",
        )
        .unwrap();

        let fetcher = FileFetcher::new(dir.path());
        let asset = fetcher.fetch("bookmarklet/bookmarklet.min.js").await.unwrap();
        assert_eq!(asset, "javascript:void(0)");
        assert!(fetcher.fetch("missing.js").await.is_err());
    }
}
