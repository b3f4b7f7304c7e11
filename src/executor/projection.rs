//! Projection of matching records onto the requested columns

use crate::query::Column;
use crate::record::Section;

use super::result::ResultRow;

/// Builds output rows from records
pub struct Projector;

impl Projector {
    /// One row per record, in input order, holding exactly `columns`.
    pub fn project(records: &[&Section], columns: &[Column]) -> Vec<ResultRow> {
        records
            .iter()
            .map(|record| {
                ResultRow::new(
                    columns
                        .iter()
                        .map(|column| (column.name.clone(), record.value(column.field)))
                        .collect(),
                )
            })
            .collect()
    }
}
