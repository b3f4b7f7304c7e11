//! Query error types
//!
//! Error codes:
//! - INSIGHT_QUERY_MALFORMED (REJECT)
//! - INSIGHT_INVALID_FIELD (REJECT)
//! - INSIGHT_INVALID_FILTER_VALUE (REJECT)
//! - INSIGHT_CROSS_DATASET_REFERENCE (REJECT)
//! - INSIGHT_DATASET_NOT_FOUND (ERROR)
//! - INSIGHT_RESULT_TOO_LARGE (LIMIT)

use std::fmt;

/// Severity levels for query errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The query itself is defective and must be corrected
    Reject,
    /// The query is valid but refers to data that is not available
    Error,
    /// The query is valid but its result exceeds the row limit
    Limit,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Limit => write!(f, "LIMIT"),
        }
    }
}

/// Query error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Missing clause, bad combinator body, unknown key
    MalformedQuery,
    /// Field outside the schema, wrong kind, or ORDER not in COLUMNS
    InvalidField,
    /// Comparison value of the wrong type or an interior wildcard
    InvalidFilterValue,
    /// More than one dataset referenced
    CrossDatasetReference,
    /// Referenced dataset has not been added
    DatasetNotFound,
    /// More matching records than the row limit
    ResultTooLarge,
}

impl QueryErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::MalformedQuery => "INSIGHT_QUERY_MALFORMED",
            QueryErrorCode::InvalidField => "INSIGHT_INVALID_FIELD",
            QueryErrorCode::InvalidFilterValue => "INSIGHT_INVALID_FILTER_VALUE",
            QueryErrorCode::CrossDatasetReference => "INSIGHT_CROSS_DATASET_REFERENCE",
            QueryErrorCode::DatasetNotFound => "INSIGHT_DATASET_NOT_FOUND",
            QueryErrorCode::ResultTooLarge => "INSIGHT_RESULT_TOO_LARGE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            QueryErrorCode::DatasetNotFound => Severity::Error,
            QueryErrorCode::ResultTooLarge => Severity::Limit,
            _ => Severity::Reject,
        }
    }

    /// True for codes describing a defect in the query text itself
    pub fn is_query_defect(&self) -> bool {
        self.severity() == Severity::Reject
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query error with context
#[derive(Debug, Clone)]
pub struct QueryError {
    /// Error code
    code: QueryErrorCode,
    /// Human-readable message
    message: String,
    /// Offending qualified field or dataset id, if any
    field: Option<String>,
}

impl QueryError {
    /// Create a malformed query error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::MalformedQuery,
            message: reason.into(),
            field: None,
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: QueryErrorCode::InvalidField,
            message: format!("Field '{}' {}", f, reason.into()),
            field: Some(f),
        }
    }

    /// Create an invalid filter value error
    pub fn invalid_filter_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: QueryErrorCode::InvalidFilterValue,
            message: format!("Value for '{}' {}", f, reason.into()),
            field: Some(f),
        }
    }

    /// Create a cross dataset reference error
    pub fn cross_dataset(expected: &str, found: &str) -> Self {
        Self {
            code: QueryErrorCode::CrossDatasetReference,
            message: format!(
                "Query references datasets '{}' and '{}'; a query may span only one",
                expected, found
            ),
            field: Some(found.to_string()),
        }
    }

    /// Create a dataset not found error
    pub fn dataset_not_found(dataset_id: impl Into<String>) -> Self {
        let id = dataset_id.into();
        Self {
            code: QueryErrorCode::DatasetNotFound,
            message: format!("Dataset '{}' has not been added", id),
            field: Some(id),
        }
    }

    /// Create an error for a dataset that exists but could not be loaded
    pub fn dataset_unreadable(dataset_id: impl Into<String>, reason: impl Into<String>) -> Self {
        let id = dataset_id.into();
        Self {
            code: QueryErrorCode::DatasetNotFound,
            message: format!("Dataset '{}' could not be loaded: {}", id, reason.into()),
            field: Some(id),
        }
    }

    /// Create a result too large error
    pub fn result_too_large(matched: usize, limit: usize) -> Self {
        Self {
            code: QueryErrorCode::ResultTooLarge,
            message: format!(
                "Query matched {} records, more than the limit of {}",
                matched, limit
            ),
            field: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending field or dataset id if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// True when the query was valid but matched too many records
    pub fn is_result_too_large(&self) -> bool {
        self.code == QueryErrorCode::ResultTooLarge
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for QueryError {}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            QueryErrorCode::MalformedQuery.code(),
            "INSIGHT_QUERY_MALFORMED"
        );
        assert_eq!(
            QueryErrorCode::CrossDatasetReference.code(),
            "INSIGHT_CROSS_DATASET_REFERENCE"
        );
        assert_eq!(
            QueryErrorCode::ResultTooLarge.code(),
            "INSIGHT_RESULT_TOO_LARGE"
        );
    }

    #[test]
    fn test_result_too_large_is_not_a_query_defect() {
        let err = QueryError::result_too_large(5001, 5000);
        assert!(err.is_result_too_large());
        assert!(!err.code().is_query_defect());
        assert_eq!(err.severity(), Severity::Limit);

        let err = QueryError::malformed("AND must be a non-empty array");
        assert!(!err.is_result_too_large());
        assert!(err.code().is_query_defect());
    }

    #[test]
    fn test_error_display() {
        let err = QueryError::invalid_field("ubc_professor", "is not a section field");
        let display = format!("{}", err);
        assert!(display.contains("REJECT"));
        assert!(display.contains("INSIGHT_INVALID_FIELD"));
        assert!(display.contains("ubc_professor"));
        assert_eq!(err.field(), Some("ubc_professor"));
    }

    #[test]
    fn test_dataset_not_found_severity() {
        let err = QueryError::dataset_not_found("ubc");
        assert_eq!(err.severity(), Severity::Error);
        assert!(err.message().contains("ubc"));
    }
}
