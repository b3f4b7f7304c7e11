//! Course file ingestion
//!
//! A course file is a JSON object whose `result` array holds raw section
//! entries:
//!
//! ```text
//! {"result": [{"id": 1234, "Course": "310", "Title": "...", "Professor": "...",
//!              "Subject": "cpsc", "Year": "2015", "Avg": 78.5, "Pass": 120,
//!              "Fail": 4, "Audit": 1, "Section": "001"}, ...]}
//! ```
//!
//! Entries missing any required key are skipped. A required key holding
//! `null`, an array or an object counts as missing too, so such an entry is
//! skipped rather than stored with a placeholder. Numeric keys must hold a
//! finite number; `Year`, `Pass`, `Fail` and `Audit` must also be integral
//! and fit in an `i64`. Entries breaking either rule are skipped.
//!
//! Entries whose `Section` is `"overall"` aggregate every offering of a
//! course and carry no real year; their year is normalized to `OVERALL_YEAR`.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::record::Section;

use super::errors::{CatalogError, CatalogResult};

/// Year assigned to "overall" pseudo-sections
pub const OVERALL_YEAR: i64 = 1900;

const REQUIRED_KEYS: [&str; 10] = [
    "id", "Course", "Title", "Professor", "Subject", "Year", "Avg", "Pass", "Fail", "Audit",
];

/// Parses one course document into sections.
///
/// A document without a `result` array contributes no sections.
pub fn sections_from_course(json: &str) -> CatalogResult<Vec<Section>> {
    let doc: Value = serde_json::from_str(json)?;
    let Some(entries) = doc.get("result").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(section_from_entry)
        .collect())
}

/// Reads every course file in `dir` (sorted by name, hidden files skipped).
///
/// Fails with `NoValidSections` if the directory yields no section at all.
pub fn sections_from_dir(dir: &Path) -> CatalogResult<Vec<Section>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if entry.file_type()?.is_file() && !hidden {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut sections = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path)?;
        sections.extend(sections_from_course(&content)?);
    }

    if sections.is_empty() {
        return Err(CatalogError::NoValidSections(dir.display().to_string()));
    }
    Ok(sections)
}

fn section_from_entry(entry: &Map<String, Value>) -> Option<Section> {
    if !REQUIRED_KEYS.iter().all(|k| entry.contains_key(*k)) {
        return None;
    }
    let get = |key: &str| entry.get(key);

    let overall = get("Section").and_then(Value::as_str) == Some("overall");
    let year = if overall {
        OVERALL_YEAR
    } else {
        integer(get("Year")?)?
    };

    Some(Section {
        uuid: text(get("id")?)?,
        id: text(get("Course")?)?,
        title: text(get("Title")?)?,
        instructor: text(get("Professor")?)?,
        dept: text(get("Subject")?)?,
        year,
        avg: number(get("Avg")?)?,
        pass: integer(get("Pass")?)?,
        fail: integer(get("Fail")?)?,
        audit: integer(get("Audit")?)?,
    })
}

/// Strings as-is, numbers in their JSON spelling
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Finite numbers, or strings holding one
fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Integral numbers, or strings holding one; `12.0` is accepted, `12.7` is not
fn integer(value: &Value) -> Option<i64> {
    if let Value::Number(n) = value {
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
    }
    if let Value::String(s) = value {
        if let Ok(i) = s.trim().parse::<i64>() {
            return Some(i);
        }
    }
    number(value).and_then(integral)
}

fn integral(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}
