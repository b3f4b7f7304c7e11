//! Observable events for insightdb
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Catalog
    /// Dataset materialized
    DatasetAdded,
    /// Dataset deleted
    DatasetRemoved,
    /// Catalog operation failed
    DatasetFailed,

    // Query
    /// Query received
    QueryReceived,
    /// Query failed validation or referenced a missing dataset
    QueryRejected,
    /// Query matched more rows than allowed
    QueryTooLarge,
    /// Query returned rows
    QueryComplete,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::DatasetAdded => "DATASET_ADDED",
            Event::DatasetRemoved => "DATASET_REMOVED",
            Event::DatasetFailed => "DATASET_FAILED",

            Event::QueryReceived => "QUERY_RECEIVED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryTooLarge => "QUERY_TOO_LARGE",
            Event::QueryComplete => "QUERY_COMPLETE",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::QueryRejected | Event::QueryTooLarge => Severity::Warn,
            Event::DatasetFailed => Severity::Error,
            Event::QueryReceived => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
