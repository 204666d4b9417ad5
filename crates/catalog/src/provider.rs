//! Async catalog sources.
//!
//! The catalog is fetched exactly once per session. `SnapshotCache` layers
//! source-first/snapshot-fallback semantics over any inner source: a
//! successful fetch refreshes the latest-known-good snapshot, a failed fetch
//! is served from it when one exists.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::document::{parse_catalog, CatalogError};
use crate::model::Catalog;

/// Catalog load failure. On failure the presentation layer surfaces the
/// message and the selection engine stays in its empty initial state.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to fetch catalog document: {0}")]
    Fetch(#[source] std::io::Error),

    #[error("catalog document is invalid: {0}")]
    Invalid(#[from] CatalogError),
}

/// Source of the raw catalog document.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<String, CatalogLoadError>;
}

/// Reads the catalog document from a local file (the picker serves its
/// catalog as a same-origin JSON document).
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    async fn fetch(&self) -> Result<String, CatalogLoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(CatalogLoadError::Fetch)
    }
}

/// Source-first with snapshot fallback.
///
/// Keeps exactly one latest-known-good document on disk. A failed snapshot
/// write never fails the load; the fresh document is still returned.
#[derive(Debug, Clone)]
pub struct SnapshotCache<S> {
    inner: S,
    snapshot_path: PathBuf,
}

impl<S> SnapshotCache<S> {
    pub fn new(inner: S, snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            snapshot_path: snapshot_path.into(),
        }
    }
}

#[async_trait]
impl<S: CatalogSource> CatalogSource for SnapshotCache<S> {
    async fn fetch(&self) -> Result<String, CatalogLoadError> {
        match self.inner.fetch().await {
            Ok(document) => {
                if let Err(err) = tokio::fs::write(&self.snapshot_path, &document).await {
                    tracing::warn!(
                        path = %self.snapshot_path.display(),
                        "failed to refresh catalog snapshot: {err}"
                    );
                }
                Ok(document)
            }
            Err(err) => match tokio::fs::read_to_string(&self.snapshot_path).await {
                Ok(document) => {
                    tracing::warn!(
                        path = %self.snapshot_path.display(),
                        "catalog source unavailable, serving snapshot: {err}"
                    );
                    Ok(document)
                }
                Err(_) => Err(err),
            },
        }
    }
}

/// Fetch, parse, and validate the catalog from a source.
pub async fn load_catalog<S: CatalogSource + ?Sized>(
    source: &S,
) -> Result<Catalog, CatalogLoadError> {
    let document = source.fetch().await?;
    Ok(parse_catalog(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
    {
      "products": {
        "P1": { "sku": "P1", "name": "Base Tent", "category": "tents", "total_cost": 100 }
      },
      "addons": {}
    }
    "#;

    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        async fn fetch(&self) -> Result<String, CatalogLoadError> {
            Err(CatalogLoadError::Fetch(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "source unavailable",
            )))
        }
    }

    #[tokio::test]
    async fn file_source_loads_a_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        tokio::fs::write(&path, DOC).await.unwrap();

        let catalog = load_catalog(&FileSource::new(&path)).await.unwrap();
        assert_eq!(catalog.products().len(), 1);
    }

    #[tokio::test]
    async fn file_source_surfaces_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));
        assert!(matches!(
            load_catalog(&source).await.unwrap_err(),
            CatalogLoadError::Fetch(_)
        ));
    }

    #[tokio::test]
    async fn snapshot_cache_refreshes_on_success_and_serves_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let doc_path = dir.path().join("products.json");
        let snapshot_path = dir.path().join("snapshot.json");
        tokio::fs::write(&doc_path, DOC).await.unwrap();

        // Successful fetch writes the snapshot.
        let cached = SnapshotCache::new(FileSource::new(&doc_path), &snapshot_path);
        let catalog = load_catalog(&cached).await.unwrap();
        assert_eq!(catalog.products().len(), 1);
        assert!(snapshot_path.exists());

        // Failing source is served from the snapshot.
        let offline = SnapshotCache::new(FailingSource, &snapshot_path);
        let catalog = load_catalog(&offline).await.unwrap();
        assert_eq!(catalog.products().len(), 1);
    }

    #[tokio::test]
    async fn snapshot_cache_without_snapshot_surfaces_the_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let offline = SnapshotCache::new(FailingSource, dir.path().join("none.json"));
        assert!(matches!(
            load_catalog(&offline).await.unwrap_err(),
            CatalogLoadError::Fetch(_)
        ));
    }
}
