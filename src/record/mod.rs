//! Record model for insightdb
//!
//! A dataset is an ordered collection of `Section` records. Every record has
//! the same fixed, flat schema: five text fields and five numeric fields.
//!
//! # Invariants
//!
//! - Records are immutable once constructed
//! - The schema is closed: `SectionField` enumerates every field
//! - Field values have a total order (used by the sorter)

mod field;
mod section;

pub use field::{FieldKind, FieldValue, SectionField};
pub use section::Section;
