//! Query execution for insightdb
//!
//! Consumes a validated `Query` and the records of its dataset, producing
//! rows in a deterministic order.
//!
//! - `FilterEvaluator`: filter tree over record positions, negation pushed down
//! - `ResultGuard`: row limit, checked before projection
//! - `Projector`: records to rows holding exactly the requested columns
//! - `ResultSorter`: stable ascending sort on the ORDER column
//! - `QueryEngine`: validation, fetch and the steps above, in that order

mod engine;
mod filters;
mod guard;
mod projection;
mod result;
mod sorter;

pub use engine::QueryEngine;
pub use filters::FilterEvaluator;
pub use guard::{ResultGuard, MAX_RESULT_ROWS};
pub use projection::Projector;
pub use result::{QueryOutput, ResultRow};
pub use sorter::ResultSorter;
