//! Query AST structures
//!
//! Defines the parsed query representation consumed by the executor.
//! Every field reference is already resolved against the section schema.

use crate::record::SectionField;

/// Wildcard marker accepted at either end of an `IS` pattern
pub const WILDCARD: char = '*';

/// Numeric comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOp {
    /// actual < value
    Lt,
    /// actual > value
    Gt,
    /// actual == value
    Eq,
}

impl NumericOp {
    /// Parses a filter key (`LT`, `GT`, `EQ`)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "LT" => Some(NumericOp::Lt),
            "GT" => Some(NumericOp::Gt),
            "EQ" => Some(NumericOp::Eq),
            _ => None,
        }
    }

    /// Returns the filter key
    pub fn key(&self) -> &'static str {
        match self {
            NumericOp::Lt => "LT",
            NumericOp::Gt => "GT",
            NumericOp::Eq => "EQ",
        }
    }

    /// Applies the operator, or its complementary relation when negated.
    ///
    /// Negated forms: `GT` → `<=`, `LT` → `>=`, `EQ` → `!=`.
    pub fn holds(&self, actual: f64, value: f64, negate: bool) -> bool {
        match (self, negate) {
            (NumericOp::Lt, false) => actual < value,
            (NumericOp::Lt, true) => actual >= value,
            (NumericOp::Gt, false) => actual > value,
            (NumericOp::Gt, true) => actual <= value,
            (NumericOp::Eq, false) => actual == value,
            (NumericOp::Eq, true) => actual != value,
        }
    }
}

/// Compiled `IS` pattern.
///
/// Wildcards may only appear at the start and/or end of the raw pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringPattern {
    /// No wildcard: whole value must be equal
    Exact(String),
    /// Trailing wildcard: `abc*`
    Prefix(String),
    /// Leading wildcard: `*abc`
    Suffix(String),
    /// Both: `*abc*`
    Contains(String),
}

impl StringPattern {
    /// Compiles a raw pattern, `None` if a wildcard appears in the interior
    pub fn compile(raw: &str) -> Option<Self> {
        let (leading, rest) = match raw.strip_prefix(WILDCARD) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (trailing, body) = match rest.strip_suffix(WILDCARD) {
            Some(body) => (true, body),
            None => (false, rest),
        };

        if body.contains(WILDCARD) {
            return None;
        }

        let body = body.to_string();
        Some(match (leading, trailing) {
            (false, false) => StringPattern::Exact(body),
            (false, true) => StringPattern::Prefix(body),
            (true, false) => StringPattern::Suffix(body),
            (true, true) => StringPattern::Contains(body),
        })
    }

    pub fn exact(s: impl Into<String>) -> Self {
        StringPattern::Exact(s.into())
    }

    pub fn prefix(s: impl Into<String>) -> Self {
        StringPattern::Prefix(s.into())
    }

    pub fn suffix(s: impl Into<String>) -> Self {
        StringPattern::Suffix(s.into())
    }

    pub fn contains(s: impl Into<String>) -> Self {
        StringPattern::Contains(s.into())
    }

    /// Tests a value against the pattern
    pub fn matches(&self, value: &str) -> bool {
        match self {
            StringPattern::Exact(s) => value == s,
            StringPattern::Prefix(s) => value.starts_with(s.as_str()),
            StringPattern::Suffix(s) => value.ends_with(s.as_str()),
            StringPattern::Contains(s) => value.contains(s.as_str()),
        }
    }
}

/// A recursive filter node
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// All children match (non-empty)
    And(Vec<FilterNode>),
    /// Any child matches (non-empty)
    Or(Vec<FilterNode>),
    /// Child does not match
    Not(Box<FilterNode>),
    /// Text field matches a wildcard pattern
    Is {
        field: SectionField,
        pattern: StringPattern,
    },
    /// Numeric field compared against a constant
    Compare {
        op: NumericOp,
        field: SectionField,
        value: f64,
    },
}

impl FilterNode {
    pub fn is(field: SectionField, pattern: StringPattern) -> Self {
        FilterNode::Is { field, pattern }
    }

    pub fn lt(field: SectionField, value: f64) -> Self {
        FilterNode::Compare {
            op: NumericOp::Lt,
            field,
            value,
        }
    }

    pub fn gt(field: SectionField, value: f64) -> Self {
        FilterNode::Compare {
            op: NumericOp::Gt,
            field,
            value,
        }
    }

    pub fn eq(field: SectionField, value: f64) -> Self {
        FilterNode::Compare {
            op: NumericOp::Eq,
            field,
            value,
        }
    }

    pub fn not(child: FilterNode) -> Self {
        FilterNode::Not(Box::new(child))
    }
}

/// A projected column: the qualified name as written plus the resolved field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Qualified name, e.g. `ubc_avg`
    pub name: String,
    /// Resolved schema field
    pub field: SectionField,
}

impl Column {
    pub fn new(dataset_id: &str, field: SectionField) -> Self {
        Self {
            name: format!("{}_{}", dataset_id, field.as_str()),
            field,
        }
    }
}

/// Output options
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Requested columns in output order, no duplicates, never empty
    pub columns: Vec<Column>,
    /// Index into `columns` of the sort key
    pub order: Option<usize>,
}

/// Parsed query
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The single dataset the query spans
    pub dataset_id: String,
    /// Filter tree; `None` matches every record
    pub filter: Option<FilterNode>,
    /// Projection and ordering
    pub options: Options,
}
