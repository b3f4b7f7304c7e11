//! Filter tree evaluation
//!
//! Walks the filter tree over record positions. Negation is a flag pushed
//! down the recursion instead of a complement computed afterwards:
//!
//! - `And` negated is evaluated as `Or` of negated children (De Morgan)
//! - `Or` negated is evaluated as `And` of negated children
//! - `Not` flips the flag
//! - leaves apply the complementary test directly
//!
//! Results keep input order and never contain a record twice.

use crate::query::FilterNode;
use crate::record::Section;

/// Evaluates filter trees against one record collection
pub struct FilterEvaluator<'a> {
    records: &'a [Section],
}

impl<'a> FilterEvaluator<'a> {
    /// Creates an evaluator over a borrowed collection
    pub fn new(records: &'a [Section]) -> Self {
        Self { records }
    }

    /// Returns the records matching `filter`; `None` matches everything.
    pub fn evaluate(&self, filter: Option<&FilterNode>) -> Vec<&'a Section> {
        match filter {
            None => self.records.iter().collect(),
            Some(node) => self.evaluate_node(node, false),
        }
    }

    /// Returns the records matching `node`, or its complement when `negate`.
    pub fn evaluate_node(&self, node: &FilterNode, negate: bool) -> Vec<&'a Section> {
        let positions = self.matching_positions(node, negate);
        positions.into_iter().map(|i| &self.records[i]).collect()
    }

    /// Positions (ascending) of the records matching `node`
    pub fn matching_positions(&self, node: &FilterNode, negate: bool) -> Vec<usize> {
        let all: Vec<usize> = (0..self.records.len()).collect();
        self.eval(node, all, negate)
    }

    fn eval(&self, node: &FilterNode, candidates: Vec<usize>, negate: bool) -> Vec<usize> {
        match (node, negate) {
            (FilterNode::And(children), false) | (FilterNode::Or(children), true) => {
                self.intersect(children, candidates, negate)
            }
            (FilterNode::Or(children), false) | (FilterNode::And(children), true) => {
                self.union(children, candidates, negate)
            }
            (FilterNode::Not(child), _) => self.eval(child, candidates, !negate),
            (FilterNode::Is { field, pattern }, _) => candidates
                .into_iter()
                .filter(|&i| match self.records[i].text(*field) {
                    Some(value) => pattern.matches(value) != negate,
                    None => false,
                })
                .collect(),
            (FilterNode::Compare { op, field, value }, _) => candidates
                .into_iter()
                .filter(|&i| match self.records[i].number(*field) {
                    Some(actual) => op.holds(actual, *value, negate),
                    None => false,
                })
                .collect(),
        }
    }

    /// Each child narrows the survivors of the previous one
    fn intersect(&self, children: &[FilterNode], candidates: Vec<usize>, negate: bool) -> Vec<usize> {
        let mut survivors = candidates;
        for child in children {
            if survivors.is_empty() {
                break;
            }
            survivors = self.eval(child, survivors, negate);
        }
        survivors
    }

    /// Every child sees the same candidates; matches are merged by position
    fn union(&self, children: &[FilterNode], candidates: Vec<usize>, negate: bool) -> Vec<usize> {
        let mut matched = vec![false; self.records.len()];
        let mut remaining = candidates.len();

        for child in children {
            if remaining == 0 {
                break;
            }
            for i in self.eval(child, candidates.clone(), negate) {
                if !matched[i] {
                    matched[i] = true;
                    remaining -= 1;
                }
            }
        }

        candidates.into_iter().filter(|&i| matched[i]).collect()
    }
}
