//! Query parser
//!
//! Builds a typed `Query` from an already-decoded JSON value.
//!
//! # Validation order (first failure wins)
//!
//! 1. Top-level shape: an object with exactly a filter clause and OPTIONS
//! 2. Namespace: one dataset across filter and options
//! 3. Filter tree: structure, field names, comparison values
//! 4. Options: columns, order

use serde_json::{Map, Value};

use crate::record::{FieldKind, SectionField};

use super::ast::{Column, FilterNode, NumericOp, Options, Query, StringPattern};
use super::errors::{QueryError, QueryResult};
use super::namespace::{split_qualified, NamespaceValidator};

/// Filter clause key
pub const WHERE_KEY: &str = "WHERE";
/// Accepted alias of the filter clause key
pub const FILTER_KEY: &str = "FILTER";
/// Options clause key
pub const OPTIONS_KEY: &str = "OPTIONS";
/// Projected columns key inside OPTIONS
pub const COLUMNS_KEY: &str = "COLUMNS";
/// Sort key inside OPTIONS
pub const ORDER_KEY: &str = "ORDER";

/// Parses query values
pub struct QueryParser;

impl QueryParser {
    /// Parses and validates a query
    pub fn parse(query: &Value) -> QueryResult<Query> {
        let (filter, options) = Self::split_clauses(query)?;

        let dataset_id = NamespaceValidator::resolve(filter, options)?;

        let filter = match filter {
            Value::Object(map) if map.is_empty() => None,
            node => Some(Self::parse_node(node, &dataset_id)?),
        };
        let options = Self::parse_options(options, &dataset_id)?;

        Ok(Query {
            dataset_id,
            filter,
            options,
        })
    }

    /// Returns the (filter, options) clauses of the top-level object
    fn split_clauses(query: &Value) -> QueryResult<(&Value, &Value)> {
        let Value::Object(map) = query else {
            return Err(QueryError::malformed("Query must be a JSON object"));
        };

        if let Some(key) = map
            .keys()
            .find(|k| !matches!(k.as_str(), WHERE_KEY | FILTER_KEY | OPTIONS_KEY))
        {
            return Err(QueryError::malformed(format!(
                "Unknown query clause '{}'",
                key
            )));
        }

        let filter = match (map.get(WHERE_KEY), map.get(FILTER_KEY)) {
            (Some(_), Some(_)) => {
                return Err(QueryError::malformed(
                    "Query must have a single WHERE clause",
                ))
            }
            (Some(f), None) | (None, Some(f)) => f,
            (None, None) => return Err(QueryError::malformed("Missing WHERE clause")),
        };
        let options = map
            .get(OPTIONS_KEY)
            .ok_or_else(|| QueryError::malformed("Missing OPTIONS clause"))?;

        if !filter.is_object() {
            return Err(QueryError::malformed("WHERE must be an object"));
        }
        if !options.is_object() {
            return Err(QueryError::malformed("OPTIONS must be an object"));
        }

        Ok((filter, options))
    }

    /// Parses one filter node (never the empty top-level filter)
    fn parse_node(node: &Value, dataset_id: &str) -> QueryResult<FilterNode> {
        let Value::Object(map) = node else {
            return Err(QueryError::malformed("Filter must be an object"));
        };
        let (key, body) = Self::single_entry(map, "Filter")?;

        match key.as_str() {
            "AND" => Ok(FilterNode::And(Self::parse_children(body, "AND", dataset_id)?)),
            "OR" => Ok(FilterNode::Or(Self::parse_children(body, "OR", dataset_id)?)),
            "NOT" => {
                if body.is_array() {
                    return Err(QueryError::malformed(
                        "NOT must contain exactly one filter",
                    ));
                }
                Ok(FilterNode::not(Self::parse_node(body, dataset_id)?))
            }
            "IS" => Self::parse_is(body, dataset_id),
            other => match NumericOp::from_key(other) {
                Some(op) => Self::parse_compare(op, body, dataset_id),
                None => Err(QueryError::malformed(format!(
                    "Unknown filter key '{}'",
                    other
                ))),
            },
        }
    }

    fn parse_children(
        body: &Value,
        clause: &str,
        dataset_id: &str,
    ) -> QueryResult<Vec<FilterNode>> {
        match body {
            Value::Array(children) if !children.is_empty() => children
                .iter()
                .map(|child| Self::parse_node(child, dataset_id))
                .collect(),
            _ => Err(QueryError::malformed(format!(
                "{} must be a non-empty array",
                clause
            ))),
        }
    }

    fn parse_is(body: &Value, dataset_id: &str) -> QueryResult<FilterNode> {
        let (name, value) = Self::comparison_entry(body, "IS")?;
        let field = Self::resolve_field(name, dataset_id, Some((FieldKind::Text, "IS")))?;

        let raw = value
            .as_str()
            .ok_or_else(|| QueryError::invalid_filter_value(name, "must be a string"))?;
        let pattern = StringPattern::compile(raw).ok_or_else(|| {
            QueryError::invalid_filter_value(
                name,
                "may only contain a wildcard at the start or end",
            )
        })?;

        Ok(FilterNode::Is { field, pattern })
    }

    fn parse_compare(op: NumericOp, body: &Value, dataset_id: &str) -> QueryResult<FilterNode> {
        let (name, value) = Self::comparison_entry(body, op.key())?;
        let field = Self::resolve_field(name, dataset_id, Some((FieldKind::Numeric, op.key())))?;

        let value = match value {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
        .ok_or_else(|| QueryError::invalid_filter_value(name, "must be a number"))?;

        Ok(FilterNode::Compare { op, field, value })
    }

    /// The single `{"<id>_<field>": value}` entry of a comparison body
    fn comparison_entry<'v>(body: &'v Value, clause: &str) -> QueryResult<(&'v str, &'v Value)> {
        let Value::Object(map) = body else {
            return Err(QueryError::malformed(format!(
                "{} must be an object",
                clause
            )));
        };
        let (name, value) = Self::single_entry(map, clause)?;
        Ok((name.as_str(), value))
    }

    fn single_entry<'v>(
        map: &'v Map<String, Value>,
        clause: &str,
    ) -> QueryResult<(&'v String, &'v Value)> {
        let mut entries = map.iter();
        match (entries.next(), entries.next()) {
            (Some(entry), None) => Ok(entry),
            _ => Err(QueryError::malformed(format!(
                "{} must contain exactly one condition, found {}",
                clause,
                map.len()
            ))),
        }
    }

    /// Resolves a qualified name to a schema field, optionally of a given kind
    fn resolve_field(
        name: &str,
        dataset_id: &str,
        expected: Option<(FieldKind, &str)>,
    ) -> QueryResult<SectionField> {
        let (prefix, bare) = split_qualified(name).ok_or_else(|| {
            QueryError::invalid_field(name, "is not qualified with a dataset id")
        })?;
        if prefix != dataset_id {
            return Err(QueryError::cross_dataset(dataset_id, prefix));
        }

        let field = SectionField::parse(bare)
            .ok_or_else(|| QueryError::invalid_field(name, "is not a section field"))?;

        if let Some((kind, clause)) = expected {
            if field.kind() != kind {
                return Err(QueryError::invalid_field(
                    name,
                    format!(
                        "is a {} field and cannot be used with {}",
                        field.kind().as_str(),
                        clause
                    ),
                ));
            }
        }
        Ok(field)
    }

    fn parse_options(options: &Value, dataset_id: &str) -> QueryResult<Options> {
        let Value::Object(map) = options else {
            return Err(QueryError::malformed("OPTIONS must be an object"));
        };

        if let Some(key) = map
            .keys()
            .find(|k| !matches!(k.as_str(), COLUMNS_KEY | ORDER_KEY))
        {
            return Err(QueryError::malformed(format!(
                "Unknown OPTIONS key '{}'",
                key
            )));
        }

        let names = match map.get(COLUMNS_KEY) {
            Some(Value::Array(names)) if !names.is_empty() => names,
            Some(_) => {
                return Err(QueryError::malformed(
                    "COLUMNS must be a non-empty array",
                ))
            }
            None => return Err(QueryError::malformed("Missing COLUMNS in OPTIONS")),
        };

        let mut columns: Vec<Column> = Vec::with_capacity(names.len());
        for name in names {
            let name = name
                .as_str()
                .ok_or_else(|| QueryError::malformed("COLUMNS entries must be strings"))?;
            let field = Self::resolve_field(name, dataset_id, None)?;
            if !columns.iter().any(|c| c.name == name) {
                columns.push(Column {
                    name: name.to_string(),
                    field,
                });
            }
        }

        let order = match map.get(ORDER_KEY) {
            None => None,
            Some(Value::String(name)) => {
                let index = columns
                    .iter()
                    .position(|c| &c.name == name)
                    .ok_or_else(|| QueryError::invalid_field(name, "is not one of COLUMNS"))?;
                Some(index)
            }
            Some(_) => return Err(QueryError::malformed("ORDER must be a string")),
        };

        Ok(Options { columns, order })
    }
}
