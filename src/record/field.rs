//! Field names, kinds and values of the section schema

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// Kind of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Compared with `IS`
    Text,
    /// Compared with `LT`, `GT`, `EQ`
    Numeric,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Numeric => "numeric",
        }
    }
}

/// Every field of a section record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionField {
    Uuid,
    Id,
    Title,
    Instructor,
    Dept,
    Year,
    Avg,
    Pass,
    Fail,
    Audit,
}

impl SectionField {
    /// All fields in schema order
    pub const ALL: [SectionField; 10] = [
        SectionField::Uuid,
        SectionField::Id,
        SectionField::Title,
        SectionField::Instructor,
        SectionField::Dept,
        SectionField::Year,
        SectionField::Avg,
        SectionField::Pass,
        SectionField::Fail,
        SectionField::Audit,
    ];

    /// Resolves a bare (unqualified) field name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name)
    }

    /// Returns the bare field name as written in queries
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionField::Uuid => "uuid",
            SectionField::Id => "id",
            SectionField::Title => "title",
            SectionField::Instructor => "instructor",
            SectionField::Dept => "dept",
            SectionField::Year => "year",
            SectionField::Avg => "avg",
            SectionField::Pass => "pass",
            SectionField::Fail => "fail",
            SectionField::Audit => "audit",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            SectionField::Uuid
            | SectionField::Id
            | SectionField::Title
            | SectionField::Instructor
            | SectionField::Dept => FieldKind::Text,
            SectionField::Year
            | SectionField::Avg
            | SectionField::Pass
            | SectionField::Fail
            | SectionField::Audit => FieldKind::Numeric,
        }
    }
}

impl fmt::Display for SectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single field value taken from a record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FieldValue {
    /// Numeric view of the value, `None` for text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
        }
    }

    /// Total order over field values.
    ///
    /// Text sorts lexicographically, numbers numerically. Within one column
    /// every value has the same kind; text sorts after numbers otherwise.
    pub fn total_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Text(_), _) => Ordering::Greater,
            (_, FieldValue::Text(_)) => Ordering::Less,
            (a, b) => {
                let a = a.as_f64().unwrap_or(0.0);
                let b = b.as_f64().unwrap_or(0.0);
                a.total_cmp(&b)
            }
        }
    }

    /// Converts to a JSON scalar
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::Integer(i) => serde_json::Value::from(*i),
            FieldValue::Float(f) => serde_json::Value::from(*f),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Integer(i) => serializer.serialize_i64(*i),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
        }
    }
}
