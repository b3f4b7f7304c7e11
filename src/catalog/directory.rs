//! Directory-backed dataset catalog
//!
//! Layout:
//!
//! ```text
//! <data_dir>/
//!   <id>.json     JSON array of sections
//! ```
//!
//! Files are written to a temporary name and renamed into place, so a
//! dataset file is either absent or complete. Once the rename succeeds
//! `add_dataset` cannot fail. A file that cannot be read is left out of
//! `list_datasets` and logged; the other datasets are still listed.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::observability::{log_event_with_fields, Event};
use crate::record::Section;

use super::errors::{CatalogError, CatalogResult};
use super::{validate_dataset_id, DatasetInfo, DatasetKind, RecordSource};

const DATASET_EXTENSION: &str = "json";

/// Datasets persisted as JSON files under one directory
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    /// Opens a catalog, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> CatalogResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn dataset_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", id, DATASET_EXTENSION))
    }

    /// Persists a dataset and returns the ids of all stored datasets
    pub fn add_dataset(&self, id: &str, sections: &[Section]) -> CatalogResult<Vec<String>> {
        validate_dataset_id(id)?;
        let path = self.dataset_path(id);
        if path.exists() {
            return Err(CatalogError::DatasetExists(id.to_string()));
        }
        if sections.is_empty() {
            return Err(CatalogError::NoValidSections(id.to_string()));
        }
        let mut ids = self.dataset_ids()?;

        let tmp_path = self.root.join(format!("{}.{}.tmp", id, DATASET_EXTENSION));
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer(&mut writer, sections)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &path)?;

        if let Err(pos) = ids.binary_search_by(|existing| existing.as_str().cmp(id)) {
            ids.insert(pos, id.to_string());
        }
        Ok(ids)
    }

    /// Deletes a dataset file and returns its id
    pub fn remove_dataset(&self, id: &str) -> CatalogResult<String> {
        validate_dataset_id(id)?;
        match fs::remove_file(self.dataset_path(id)) {
            Ok(()) => Ok(id.to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(CatalogError::DatasetNotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Lists stored datasets ordered by id, skipping files that cannot be read
    pub fn list_datasets(&self) -> CatalogResult<Vec<DatasetInfo>> {
        let mut infos = Vec::new();
        for id in self.dataset_ids()? {
            match Self::read_sections(&self.dataset_path(&id)) {
                Ok(sections) => infos.push(DatasetInfo {
                    id,
                    kind: DatasetKind::Sections,
                    num_rows: sections.len(),
                }),
                Err(err) => {
                    let message = err.to_string();
                    log_event_with_fields(
                        Event::DatasetFailed,
                        &[
                            ("code", err.code()),
                            ("dataset", id.as_str()),
                            ("message", message.as_str()),
                        ],
                    );
                }
            }
        }
        Ok(infos)
    }

    /// Ids of the `<id>.json` files under the root, sorted, without reading them
    fn dataset_ids(&self) -> CatalogResult<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(DATASET_EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_dataset_id(id).is_ok() {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn read_sections(path: &Path) -> CatalogResult<Vec<Section>> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl RecordSource for DirectoryCatalog {
    fn fetch_records(&self, dataset_id: &str) -> CatalogResult<Cow<'_, [Section]>> {
        if validate_dataset_id(dataset_id).is_err() {
            return Err(CatalogError::DatasetNotFound(dataset_id.to_string()));
        }
        let path = self.dataset_path(dataset_id);
        match Self::read_sections(&path) {
            Ok(sections) => Ok(Cow::Owned(sections)),
            Err(CatalogError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                Err(CatalogError::DatasetNotFound(dataset_id.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}
