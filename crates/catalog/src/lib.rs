//! `camocpq-catalog` — immutable session catalog: typed product/add-on
//! records, document parsing with load-time validation, and async catalog
//! sources with a latest-known-good snapshot fallback.

pub mod document;
pub mod model;
pub mod provider;

pub use document::{parse_catalog, CatalogError};
pub use model::{Addon, Catalog, Product};
pub use provider::{load_catalog, CatalogLoadError, CatalogSource, FileSource, SnapshotCache};
