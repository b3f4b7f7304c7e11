//! Namespace Validation Tests
//!
//! A query spans exactly one dataset:
//! - Every qualified field in WHERE and OPTIONS shares one prefix
//! - The dataset is named by OPTIONS even when WHERE is empty
//! - Namespace problems are reported before field problems
//! - A valid query over an unknown dataset fails at fetch time

use insightdb::catalog::MemoryCatalog;
use insightdb::executor::QueryEngine;
use insightdb::query::{NamespaceValidator, QueryErrorCode, QueryParser};
use insightdb::record::Section;
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    catalog
        .add_dataset(
            "datasetA",
            vec![Section::new("1", "310", "t", "p", "cpsc", 2015, 80.0, 1, 0, 0)],
        )
        .unwrap();
    catalog
        .add_dataset(
            "datasetB",
            vec![Section::new("2", "100", "t", "p", "math", 2016, 90.0, 1, 0, 0)],
        )
        .unwrap();
    catalog
}

fn error_code(query: Value) -> QueryErrorCode {
    let catalog = catalog();
    QueryEngine::new(&catalog)
        .perform_query(&query)
        .unwrap_err()
        .code()
}

// =============================================================================
// Single Dataset Tests
// =============================================================================

/// Filter on one dataset, columns on another.
#[test]
fn test_filter_and_columns_disagree() {
    let code = error_code(json!({
        "WHERE": {"GT": {"datasetA_avg": 90}},
        "OPTIONS": {"COLUMNS": ["datasetB_avg"]}
    }));
    assert_eq!(code, QueryErrorCode::CrossDatasetReference);
}

/// Two datasets inside the filter tree.
#[test]
fn test_filter_mixes_datasets() {
    let code = error_code(json!({
        "WHERE": {"AND": [
            {"GT": {"datasetA_avg": 90}},
            {"NOT": {"IS": {"datasetB_dept": "cpsc"}}}
        ]},
        "OPTIONS": {"COLUMNS": ["datasetA_avg"]}
    }));
    assert_eq!(code, QueryErrorCode::CrossDatasetReference);
}

/// Two datasets among the columns, or between columns and ORDER.
#[test]
fn test_options_mix_datasets() {
    assert_eq!(
        error_code(json!({
            "WHERE": {},
            "OPTIONS": {"COLUMNS": ["datasetA_avg", "datasetB_avg"]}
        })),
        QueryErrorCode::CrossDatasetReference
    );
    assert_eq!(
        error_code(json!({
            "WHERE": {},
            "OPTIONS": {"COLUMNS": ["datasetA_avg"], "ORDER": "datasetB_avg"}
        })),
        QueryErrorCode::CrossDatasetReference
    );
}

/// Cross-dataset wins over an unknown field name in the same query.
#[test]
fn test_namespace_checked_first() {
    let code = error_code(json!({
        "WHERE": {"GT": {"datasetA_nosuchfield": 90}},
        "OPTIONS": {"COLUMNS": ["datasetB_avg"]}
    }));
    assert_eq!(code, QueryErrorCode::CrossDatasetReference);
}

/// Each dataset answers only for its own records.
#[test]
fn test_each_dataset_queried_alone() {
    let catalog = catalog();
    let engine = QueryEngine::new(&catalog);

    let a = engine
        .perform_query(&json!({"WHERE": {}, "OPTIONS": {"COLUMNS": ["datasetA_dept"]}}))
        .unwrap();
    let b = engine
        .perform_query(&json!({"WHERE": {}, "OPTIONS": {"COLUMNS": ["datasetB_dept"]}}))
        .unwrap();

    assert_eq!(a.dataset_id, "datasetA");
    assert_eq!(a.to_json(), json!([{"datasetA_dept": "cpsc"}]));
    assert_eq!(b.to_json(), json!([{"datasetB_dept": "math"}]));
}

// =============================================================================
// Resolution Tests
// =============================================================================

/// The validator returns the one prefix in use.
#[test]
fn test_resolve_prefix() {
    let id = NamespaceValidator::resolve(
        &json!({"OR": [{"IS": {"courses_dept": "a"}}, {"LT": {"courses_year": 2000}}]}),
        &json!({"COLUMNS": ["courses_dept"], "ORDER": "courses_dept"}),
    )
    .unwrap();
    assert_eq!(id, "courses");
}

/// Only the first underscore separates the prefix.
#[test]
fn test_prefix_ends_at_first_underscore() {
    let query = QueryParser::parse(&json!({
        "WHERE": {},
        "OPTIONS": {"COLUMNS": ["ubc_avg"]}
    }))
    .unwrap();
    assert_eq!(query.dataset_id, "ubc");

    let err = QueryParser::parse(&json!({
        "WHERE": {},
        "OPTIONS": {"COLUMNS": ["ubc_avg_x"]}
    }))
    .unwrap_err();
    assert_eq!(err.code(), QueryErrorCode::InvalidField);
}

/// A query naming no dataset at all is malformed.
#[test]
fn test_no_dataset_referenced() {
    assert_eq!(
        error_code(json!({"WHERE": {}, "OPTIONS": {"COLUMNS": ["avg"]}})),
        QueryErrorCode::MalformedQuery
    );
    assert_eq!(
        error_code(json!({"WHERE": {}, "OPTIONS": {"COLUMNS": []}})),
        QueryErrorCode::MalformedQuery
    );
}

/// Well-formed query over a dataset that was never added.
#[test]
fn test_unknown_dataset() {
    let catalog = catalog();
    let err = QueryEngine::new(&catalog)
        .perform_query(&json!({
            "WHERE": {"GT": {"datasetC_avg": 1}},
            "OPTIONS": {"COLUMNS": ["datasetC_avg"]}
        }))
        .unwrap_err();

    assert_eq!(err.code(), QueryErrorCode::DatasetNotFound);
    assert_eq!(err.field(), Some("datasetC"));
    assert!(!err.code().is_query_defect());
}
