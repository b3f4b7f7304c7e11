//! In-memory dataset catalog

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::record::Section;

use super::errors::{CatalogError, CatalogResult};
use super::{validate_dataset_id, DatasetInfo, DatasetKind, RecordSource};

/// Datasets held in process memory, keyed by id
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    datasets: BTreeMap<String, Vec<Section>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dataset and returns the ids of all stored datasets
    pub fn add_dataset(&mut self, id: &str, sections: Vec<Section>) -> CatalogResult<Vec<String>> {
        validate_dataset_id(id)?;
        if self.datasets.contains_key(id) {
            return Err(CatalogError::DatasetExists(id.to_string()));
        }
        if sections.is_empty() {
            return Err(CatalogError::NoValidSections(id.to_string()));
        }

        self.datasets.insert(id.to_string(), sections);
        Ok(self.datasets.keys().cloned().collect())
    }

    /// Removes a dataset and returns its id
    pub fn remove_dataset(&mut self, id: &str) -> CatalogResult<String> {
        validate_dataset_id(id)?;
        self.datasets
            .remove(id)
            .map(|_| id.to_string())
            .ok_or_else(|| CatalogError::DatasetNotFound(id.to_string()))
    }

    /// Lists stored datasets ordered by id
    pub fn list_datasets(&self) -> Vec<DatasetInfo> {
        self.datasets
            .iter()
            .map(|(id, sections)| DatasetInfo {
                id: id.clone(),
                kind: DatasetKind::Sections,
                num_rows: sections.len(),
            })
            .collect()
    }
}

impl RecordSource for MemoryCatalog {
    fn fetch_records(&self, dataset_id: &str) -> CatalogResult<Cow<'_, [Section]>> {
        self.datasets
            .get(dataset_id)
            .map(|sections| Cow::Borrowed(sections.as_slice()))
            .ok_or_else(|| CatalogError::DatasetNotFound(dataset_id.to_string()))
    }
}
