//! Query orchestration
//!
//! Execution flow (strict order):
//! 1. Validate shape, namespace, fields and values
//! 2. Fetch the records of the one referenced dataset
//! 3. Evaluate the filter tree
//! 4. Enforce the row limit
//! 5. Project onto COLUMNS
//! 6. Sort by ORDER (if specified)
//!
//! The first failure aborts; no partial result is ever returned.

use serde_json::Value;

use crate::catalog::{CatalogError, RecordSource};
use crate::observability::{log_event_with_fields, Event, QueryMetrics};
use crate::query::{Query, QueryError, QueryParser, QueryResult};

use super::filters::FilterEvaluator;
use super::guard::ResultGuard;
use super::projection::Projector;
use super::result::QueryOutput;
use super::sorter::ResultSorter;

/// Runs JSON queries against a record source
pub struct QueryEngine<'a, S: RecordSource> {
    source: &'a S,
    guard: ResultGuard,
    metrics: Option<&'a QueryMetrics>,
}

impl<'a, S: RecordSource> QueryEngine<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            guard: ResultGuard::default(),
            metrics: None,
        }
    }

    /// Counts outcomes into `metrics`
    pub fn with_metrics(mut self, metrics: &'a QueryMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Replaces the default row limit
    pub fn with_guard(mut self, guard: ResultGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Validates a query without touching any dataset
    pub fn parse(&self, query: &Value) -> QueryResult<Query> {
        QueryParser::parse(query)
    }

    /// Validates and runs one query.
    ///
    /// Same query + same records = same rows in the same order.
    pub fn perform_query(&self, query: &Value) -> QueryResult<QueryOutput> {
        self.run(query).map_err(|err| self.reject(err))
    }

    fn run(&self, raw: &Value) -> QueryResult<QueryOutput> {
        let query = self.parse(raw)?;
        log_event_with_fields(Event::QueryReceived, &[("dataset", query.dataset_id.as_str())]);

        let records = self
            .source
            .fetch_records(&query.dataset_id)
            .map_err(|err| match err {
                CatalogError::DatasetNotFound(id) => QueryError::dataset_not_found(id),
                other => QueryError::dataset_unreadable(&query.dataset_id, other.to_string()),
            })?;

        let matched = FilterEvaluator::new(&records).evaluate(query.filter.as_ref());
        self.guard.check(matched.len())?;

        let mut rows = Projector::project(&matched, &query.options.columns);
        if let Some(order) = query.options.order {
            ResultSorter::sort(&mut rows, order);
        }

        let output = QueryOutput {
            dataset_id: query.dataset_id,
            rows,
            scanned_count: records.len(),
        };

        if let Some(metrics) = self.metrics {
            metrics.record_executed(output.len());
        }
        log_event_with_fields(
            Event::QueryComplete,
            &[
                ("dataset", output.dataset_id.as_str()),
                ("rows", output.len().to_string().as_str()),
                ("scanned", output.scanned_count.to_string().as_str()),
            ],
        );
        Ok(output)
    }

    fn reject(&self, err: QueryError) -> QueryError {
        let event = if err.is_result_too_large() {
            Event::QueryTooLarge
        } else {
            Event::QueryRejected
        };

        if let Some(metrics) = self.metrics {
            if err.is_result_too_large() {
                metrics.increment_too_large();
            } else {
                metrics.increment_rejected();
            }
        }

        log_event_with_fields(
            event,
            &[("code", err.code().code()), ("message", err.message())],
        );
        err
    }
}
