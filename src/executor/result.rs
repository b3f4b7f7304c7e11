//! Result types for query execution

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::record::FieldValue;

/// One output row: qualified column names mapped to values, in column order
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    cells: Vec<(String, FieldValue)>,
}

impl ResultRow {
    /// Creates a row from (column, value) pairs
    pub fn new(cells: Vec<(String, FieldValue)>) -> Self {
        Self { cells }
    }

    /// Looks up a value by qualified column name
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Value at a column position
    pub fn value_at(&self, index: usize) -> Option<&FieldValue> {
        self.cells.get(index).map(|(_, value)| value)
    }

    /// Column names in output order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Converts to a JSON object
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .cells
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Result of one query
#[derive(Debug, Clone)]
pub struct QueryOutput {
    /// Dataset the query ran against
    pub dataset_id: String,
    /// Rows in output order
    pub rows: Vec<ResultRow>,
    /// Number of records scanned
    pub scanned_count: usize,
}

impl QueryOutput {
    /// Returns true if no records matched
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns an iterator over the rows
    pub fn iter(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter()
    }

    /// Rows as a JSON array
    pub fn to_json(&self) -> Value {
        Value::Array(self.rows.iter().map(ResultRow::to_json).collect())
    }
}
