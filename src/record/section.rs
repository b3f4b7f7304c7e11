//! Section record

use serde::{Deserialize, Serialize};

use super::field::{FieldValue, SectionField};

/// One course section observation.
///
/// The on-disk form (catalog files) is the serde representation of this
/// struct, one JSON object per section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub uuid: String,
    pub id: String,
    pub title: String,
    pub instructor: String,
    pub dept: String,
    pub year: i64,
    pub avg: f64,
    pub pass: i64,
    pub fail: i64,
    pub audit: i64,
}

impl Section {
    /// Creates a new section
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        uuid: impl Into<String>,
        id: impl Into<String>,
        title: impl Into<String>,
        instructor: impl Into<String>,
        dept: impl Into<String>,
        year: i64,
        avg: f64,
        pass: i64,
        fail: i64,
        audit: i64,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            id: id.into(),
            title: title.into(),
            instructor: instructor.into(),
            dept: dept.into(),
            year,
            avg,
            pass,
            fail,
            audit,
        }
    }

    /// Borrows a text field, `None` for numeric fields
    pub fn text(&self, field: SectionField) -> Option<&str> {
        match field {
            SectionField::Uuid => Some(&self.uuid),
            SectionField::Id => Some(&self.id),
            SectionField::Title => Some(&self.title),
            SectionField::Instructor => Some(&self.instructor),
            SectionField::Dept => Some(&self.dept),
            _ => None,
        }
    }

    /// Reads a numeric field as `f64`, `None` for text fields
    pub fn number(&self, field: SectionField) -> Option<f64> {
        match field {
            SectionField::Year => Some(self.year as f64),
            SectionField::Avg => Some(self.avg),
            SectionField::Pass => Some(self.pass as f64),
            SectionField::Fail => Some(self.fail as f64),
            SectionField::Audit => Some(self.audit as f64),
            _ => None,
        }
    }

    /// Returns an owned copy of any field
    pub fn value(&self, field: SectionField) -> FieldValue {
        match field {
            SectionField::Uuid => FieldValue::Text(self.uuid.clone()),
            SectionField::Id => FieldValue::Text(self.id.clone()),
            SectionField::Title => FieldValue::Text(self.title.clone()),
            SectionField::Instructor => FieldValue::Text(self.instructor.clone()),
            SectionField::Dept => FieldValue::Text(self.dept.clone()),
            SectionField::Year => FieldValue::Integer(self.year),
            SectionField::Avg => FieldValue::Float(self.avg),
            SectionField::Pass => FieldValue::Integer(self.pass),
            SectionField::Fail => FieldValue::Integer(self.fail),
            SectionField::Audit => FieldValue::Integer(self.audit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Section {
        Section::new("1234", "310", "softw eng", "holmes, reid", "cpsc", 2015, 78.5, 120, 4, 1)
    }

    #[test]
    fn test_text_accessors() {
        let s = sample();
        assert_eq!(s.text(SectionField::Dept), Some("cpsc"));
        assert_eq!(s.text(SectionField::Instructor), Some("holmes, reid"));
        assert_eq!(s.text(SectionField::Avg), None);
    }

    #[test]
    fn test_numeric_accessors() {
        let s = sample();
        assert_eq!(s.number(SectionField::Avg), Some(78.5));
        assert_eq!(s.number(SectionField::Year), Some(2015.0));
        assert_eq!(s.number(SectionField::Title), None);
    }

    #[test]
    fn test_value_preserves_integer_fields() {
        let s = sample();
        assert_eq!(s.value(SectionField::Pass), FieldValue::Integer(120));
        assert_eq!(s.value(SectionField::Avg), FieldValue::Float(78.5));
        assert_eq!(s.value(SectionField::Id), FieldValue::Text("310".into()));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["dept"], "cpsc");
        assert_eq!(json["year"], 2015);

        let back: Section = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }
}
