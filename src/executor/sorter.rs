//! Result sorting for query execution
//!
//! Ascending, stable, total order over the key column's values.

use std::cmp::Ordering;

use super::result::ResultRow;
use crate::record::FieldValue;

/// Sorts result rows
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts rows ascending by the value at `column` (a position in the row).
    ///
    /// Rows with equal keys keep their relative input order.
    pub fn sort(rows: &mut [ResultRow], column: usize) {
        rows.sort_by(|a, b| Self::compare_values(a.value_at(column), b.value_at(column)));
    }

    /// Compares two optional values.
    ///
    /// A missing value sorts before any present value.
    fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_val), Some(b_val)) => a_val.total_cmp(b_val),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(id: &str, avg: f64) -> ResultRow {
        ResultRow::new(vec![
            ("x_uuid".to_string(), FieldValue::Text(id.to_string())),
            ("x_avg".to_string(), FieldValue::Float(avg)),
        ])
    }

    fn ids(rows: &[ResultRow]) -> Vec<String> {
        rows.iter()
            .map(|r| r.value_at(0).map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_sort_ascending() {
        let mut rows = vec![make_row("c", 90.0), make_row("a", 70.0), make_row("b", 80.0)];

        ResultSorter::sort(&mut rows, 1);

        assert_eq!(ids(&rows), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_stable() {
        // Same avg, original order preserved
        let mut rows = vec![
            make_row("a", 75.0),
            make_row("z", 60.0),
            make_row("b", 75.0),
            make_row("c", 75.0),
        ];

        ResultSorter::sort(&mut rows, 1);

        assert_eq!(ids(&rows), vec!["z", "a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_string() {
        let mut rows = vec![make_row("charlie", 1.0), make_row("alice", 2.0), make_row("bob", 3.0)];

        ResultSorter::sort(&mut rows, 0);

        assert_eq!(ids(&rows), vec!["alice", "bob", "charlie"]);
    }

    #[test]
    fn test_sort_integers() {
        let mut rows: Vec<ResultRow> = [2016, 2009, 1900]
            .iter()
            .map(|y| ResultRow::new(vec![("x_year".to_string(), FieldValue::Integer(*y))]))
            .collect();

        ResultSorter::sort(&mut rows, 0);

        let years: Vec<_> = rows.iter().map(|r| r.value_at(0).cloned()).collect();
        assert_eq!(
            years,
            vec![
                Some(FieldValue::Integer(1900)),
                Some(FieldValue::Integer(2009)),
                Some(FieldValue::Integer(2016)),
            ]
        );
    }
}
