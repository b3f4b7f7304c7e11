//! Dataset catalog for insightdb
//!
//! The query engine never touches storage. It asks a `RecordSource` for the
//! records of one dataset and borrows them for the duration of a query.
//!
//! Two catalogs are provided:
//! - `MemoryCatalog`: datasets held in process memory
//! - `DirectoryCatalog`: one `<id>.json` file per dataset under a data directory
//!
//! Course files are turned into records by the `ingest` module.

mod directory;
mod errors;
pub mod ingest;
mod memory;

pub use directory::DirectoryCatalog;
pub use errors::{CatalogError, CatalogResult};
pub use memory::MemoryCatalog;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::record::Section;

/// Supplies the records of a dataset
pub trait RecordSource {
    /// Records of `dataset_id` in stored order.
    ///
    /// Fails with `CatalogError::DatasetNotFound` for unknown datasets.
    fn fetch_records(&self, dataset_id: &str) -> CatalogResult<Cow<'_, [Section]>>;
}

/// Kind of a dataset; only flat section datasets exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Sections,
}

/// Summary of a stored dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub id: String,
    pub kind: DatasetKind,
    pub num_rows: usize,
}

/// Checks a dataset id before it is used as a namespace or a file name.
///
/// Ids must be non-empty, not only whitespace, and free of underscores
/// (the underscore separates the id from the field in qualified names).
pub fn validate_dataset_id(id: &str) -> CatalogResult<()> {
    if id.is_empty() {
        return Err(CatalogError::InvalidDatasetId(id.to_string(), "id is empty"));
    }
    if id.trim().is_empty() {
        return Err(CatalogError::InvalidDatasetId(
            id.to_string(),
            "id is only whitespace",
        ));
    }
    if id.contains('_') {
        return Err(CatalogError::InvalidDatasetId(
            id.to_string(),
            "id contains an underscore",
        ));
    }
    if id.contains(['/', '\\']) || id == "." || id == ".." {
        return Err(CatalogError::InvalidDatasetId(
            id.to_string(),
            "id contains a path separator",
        ));
    }
    Ok(())
}
