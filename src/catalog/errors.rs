//! # Catalog Errors

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Dataset catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    // Id errors
    #[error("Invalid dataset id '{0}': {1}")]
    InvalidDatasetId(String, &'static str),

    // Lifecycle errors
    #[error("Dataset already exists: {0}")]
    DatasetExists(String),

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    // Ingestion errors
    #[error("No valid sections in {0}")]
    NoValidSections(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::InvalidDatasetId(..) => "INSIGHT_CATALOG_INVALID_ID",
            CatalogError::DatasetExists(_) => "INSIGHT_CATALOG_DATASET_EXISTS",
            CatalogError::DatasetNotFound(_) => "INSIGHT_DATASET_NOT_FOUND",
            CatalogError::NoValidSections(_) => "INSIGHT_CATALOG_NO_VALID_SECTIONS",
            CatalogError::Io(_) => "INSIGHT_CATALOG_IO",
            CatalogError::Serialization(_) => "INSIGHT_CATALOG_SERIALIZATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CatalogError::DatasetNotFound("ubc".into()).code(),
            "INSIGHT_DATASET_NOT_FOUND"
        );
        assert_eq!(
            CatalogError::DatasetExists("ubc".into()).code(),
            "INSIGHT_CATALOG_DATASET_EXISTS"
        );

        let io = CatalogError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.code(), "INSIGHT_CATALOG_IO");
        assert!(io.to_string().contains("disk"));
    }
}
