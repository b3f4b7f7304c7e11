//! Dataset namespace validation
//!
//! Every field reference is written `<datasetId>_<field>`. A query spans
//! exactly one dataset, so every prefix in the filter clause and in the
//! options clause must be the same.
//!
//! Runs on the raw JSON before the typed query is built. Shapes that are not
//! understood here are skipped; the parser reports them.

use serde_json::Value;

use super::errors::{QueryError, QueryResult};
use super::parser::{COLUMNS_KEY, ORDER_KEY};

/// Splits a qualified field name at the first underscore.
///
/// Returns `None` when there is no underscore or the dataset prefix is empty.
pub fn split_qualified(name: &str) -> Option<(&str, &str)> {
    match name.split_once('_') {
        Some((prefix, field)) if !prefix.is_empty() => Some((prefix, field)),
        _ => None,
    }
}

/// Tracks the single prefix seen so far within one clause
#[derive(Debug, Default)]
struct PrefixSet {
    first: Option<String>,
}

impl PrefixSet {
    fn observe(&mut self, name: &str) -> QueryResult<()> {
        let Some((prefix, _)) = split_qualified(name) else {
            return Ok(());
        };
        match &self.first {
            None => {
                self.first = Some(prefix.to_string());
                Ok(())
            }
            Some(first) if first == prefix => Ok(()),
            Some(first) => Err(QueryError::cross_dataset(first, prefix)),
        }
    }

    fn into_prefix(self) -> Option<String> {
        self.first
    }
}

/// Resolves the dataset a query refers to
pub struct NamespaceValidator;

impl NamespaceValidator {
    /// Returns the single dataset id referenced by `filter` and `options`.
    ///
    /// An empty filter has no prefix of its own; the options prefix is then
    /// authoritative.
    pub fn resolve(filter: &Value, options: &Value) -> QueryResult<String> {
        let mut filter_prefixes = PrefixSet::default();
        Self::collect_filter(filter, &mut filter_prefixes)?;

        let mut option_prefixes = PrefixSet::default();
        Self::collect_options(options, &mut option_prefixes)?;

        let filter_prefix = filter_prefixes.into_prefix();
        let options_prefix = match option_prefixes.into_prefix() {
            Some(p) => p,
            None if filter_prefix.is_none() => {
                return Err(QueryError::malformed(
                    "Query does not reference any dataset",
                ))
            }
            None => {
                return Err(QueryError::malformed(
                    "OPTIONS must reference at least one qualified column",
                ))
            }
        };

        match filter_prefix {
            Some(p) if p != options_prefix => Err(QueryError::cross_dataset(&options_prefix, &p)),
            _ => Ok(options_prefix),
        }
    }

    fn collect_filter(node: &Value, acc: &mut PrefixSet) -> QueryResult<()> {
        let Value::Object(map) = node else {
            return Ok(());
        };

        for (key, body) in map {
            match key.as_str() {
                "AND" | "OR" => {
                    if let Value::Array(children) = body {
                        for child in children {
                            Self::collect_filter(child, acc)?;
                        }
                    }
                }
                "NOT" => Self::collect_filter(body, acc)?,
                "IS" | "LT" | "GT" | "EQ" => {
                    if let Value::Object(comparison) = body {
                        for name in comparison.keys() {
                            acc.observe(name)?;
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn collect_options(options: &Value, acc: &mut PrefixSet) -> QueryResult<()> {
        if let Some(Value::Array(columns)) = options.get(COLUMNS_KEY) {
            for name in columns.iter().filter_map(Value::as_str) {
                acc.observe(name)?;
            }
        }
        if let Some(order) = options.get(ORDER_KEY).and_then(Value::as_str) {
            acc.observe(order)?;
        }
        Ok(())
    }
}
