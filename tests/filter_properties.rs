//! Property-based tests for filter evaluation using proptest.

use proptest::prelude::*;
use insightdb::executor::FilterEvaluator;
use insightdb::query::{FilterNode, StringPattern};
use insightdb::record::{Section, SectionField};

// ============================================================================
// Test helpers
// ============================================================================

// Few distinct values so that equal comparisons and shared prefixes happen
fn section_strategy() -> impl Strategy<Value = Section> {
    ("[a-c]{0,3}", 0..6i32, 0..4i64).prop_map(|(dept, avg, pass)| Section {
        dept,
        avg: f64::from(avg) * 10.0,
        pass,
        ..Default::default()
    })
}

fn records_strategy() -> impl Strategy<Value = Vec<Section>> {
    prop::collection::vec(section_strategy(), 0..40)
}

fn leaf_strategy() -> impl Strategy<Value = FilterNode> {
    prop_oneof![
        (0..4u8, "[a-c]{0,2}").prop_map(|(kind, s)| {
            let pattern = match kind {
                0 => StringPattern::exact(s),
                1 => StringPattern::prefix(s),
                2 => StringPattern::suffix(s),
                _ => StringPattern::contains(s),
            };
            FilterNode::is(SectionField::Dept, pattern)
        }),
        (0..3u8, 0..6i32).prop_map(|(op, v)| {
            let value = f64::from(v) * 10.0;
            match op {
                0 => FilterNode::lt(SectionField::Avg, value),
                1 => FilterNode::gt(SectionField::Avg, value),
                _ => FilterNode::eq(SectionField::Avg, value),
            }
        }),
        (0..4i32).prop_map(|v| FilterNode::gt(SectionField::Pass, f64::from(v))),
    ]
}

fn filter_strategy() -> impl Strategy<Value = FilterNode> {
    leaf_strategy().prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(FilterNode::And),
            prop::collection::vec(inner.clone(), 1..4).prop_map(FilterNode::Or),
            inner.prop_map(FilterNode::not),
        ]
    })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// NOT(NOT(f)) selects exactly what f selects.
    #[test]
    fn double_negation_is_identity(records in records_strategy(), f in filter_strategy()) {
        let eval = FilterEvaluator::new(&records);
        let twice = FilterNode::not(FilterNode::not(f.clone()));
        prop_assert_eq!(
            eval.matching_positions(&twice, false),
            eval.matching_positions(&f, false)
        );
    }

    /// NOT(AND(a, b)) == OR(NOT a, NOT b).
    #[test]
    fn de_morgan_and(records in records_strategy(), a in filter_strategy(), b in filter_strategy()) {
        let eval = FilterEvaluator::new(&records);
        let left = FilterNode::not(FilterNode::And(vec![a.clone(), b.clone()]));
        let right = FilterNode::Or(vec![FilterNode::not(a), FilterNode::not(b)]);
        prop_assert_eq!(
            eval.matching_positions(&left, false),
            eval.matching_positions(&right, false)
        );
    }

    /// NOT(OR(a, b)) == AND(NOT a, NOT b).
    #[test]
    fn de_morgan_or(records in records_strategy(), a in filter_strategy(), b in filter_strategy()) {
        let eval = FilterEvaluator::new(&records);
        let left = FilterNode::not(FilterNode::Or(vec![a.clone(), b.clone()]));
        let right = FilterNode::And(vec![FilterNode::not(a), FilterNode::not(b)]);
        prop_assert_eq!(
            eval.matching_positions(&left, false),
            eval.matching_positions(&right, false)
        );
    }

    /// A filter and its negation split the collection in two.
    #[test]
    fn negation_partitions_records(records in records_strategy(), f in filter_strategy()) {
        let eval = FilterEvaluator::new(&records);
        let matched = eval.matching_positions(&f, false);
        let rest = eval.matching_positions(&f, true);

        prop_assert_eq!(matched.len() + rest.len(), records.len());
        for i in &matched {
            prop_assert!(!rest.contains(i));
        }
    }

    /// Positions come back ascending, each at most once.
    #[test]
    fn results_ordered_without_duplicates(records in records_strategy(), f in filter_strategy()) {
        let eval = FilterEvaluator::new(&records);
        let positions = eval.matching_positions(&f, false);
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// Every record is exactly one of LT, EQ, GT a given value.
    #[test]
    fn numeric_trichotomy(records in records_strategy(), v in 0..6i32) {
        let eval = FilterEvaluator::new(&records);
        let value = f64::from(v) * 10.0;

        let lt = eval.matching_positions(&FilterNode::lt(SectionField::Avg, value), false);
        let eq = eval.matching_positions(&FilterNode::eq(SectionField::Avg, value), false);
        let gt = eval.matching_positions(&FilterNode::gt(SectionField::Avg, value), false);

        prop_assert_eq!(lt.len() + eq.len() + gt.len(), records.len());
    }

    /// NOT(GT x) == OR(LT x, EQ x).
    #[test]
    fn not_gt_is_lt_or_eq(records in records_strategy(), v in 0..6i32) {
        let eval = FilterEvaluator::new(&records);
        let value = f64::from(v) * 10.0;

        let not_gt = FilterNode::not(FilterNode::gt(SectionField::Avg, value));
        let lt_or_eq = FilterNode::Or(vec![
            FilterNode::lt(SectionField::Avg, value),
            FilterNode::eq(SectionField::Avg, value),
        ]);
        prop_assert_eq!(
            eval.matching_positions(&not_gt, false),
            eval.matching_positions(&lt_or_eq, false)
        );
    }

    /// Wildcard placement selects prefix, suffix or substring matching.
    #[test]
    fn wildcard_semantics(value in "[a-c]{0,5}", body in "[a-c]{0,2}") {
        let compile = |raw: String| StringPattern::compile(&raw).unwrap();

        prop_assert_eq!(compile(body.clone()).matches(&value), value == body);
        prop_assert_eq!(compile(format!("{}*", body)).matches(&value), value.starts_with(&body));
        prop_assert_eq!(compile(format!("*{}", body)).matches(&value), value.ends_with(&body));
        prop_assert_eq!(compile(format!("*{}*", body)).matches(&value), value.contains(&body));
    }

    /// A wildcard between two non-empty parts never compiles.
    #[test]
    fn interior_wildcard_rejected(a in "[a-c]{1,3}", b in "[a-c]{1,3}") {
        let inner = format!("{}*{}", a, b);
        let wrapped = format!("*{}*{}*", a, b);
        prop_assert!(StringPattern::compile(&inner).is_none());
        prop_assert!(StringPattern::compile(&wrapped).is_none());
    }
}
