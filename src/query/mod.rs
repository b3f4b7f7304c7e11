//! Query model for insightdb
//!
//! Turns a decoded JSON query into a typed, fully validated `Query`.
//!
//! # Design Principles
//!
//! - Closed filter tree: `And | Or | Not | Is | Compare`
//! - One dataset per query, checked before anything else about fields
//! - Eager: every field and value is checked before evaluation starts
//! - Explicit: no coercion of comparison values
//!
//! # Query shape
//!
//! ```text
//! {
//!   "WHERE":   <filter> | {},
//!   "OPTIONS": { "COLUMNS": ["<id>_<field>", ...], "ORDER": "<id>_<field>" }
//! }
//! ```

mod ast;
mod errors;
mod namespace;
mod parser;

pub use ast::{Column, FilterNode, NumericOp, Options, Query, StringPattern, WILDCARD};
pub use errors::{QueryError, QueryErrorCode, QueryResult, Severity};
pub use namespace::{split_qualified, NamespaceValidator};
pub use parser::{QueryParser, COLUMNS_KEY, FILTER_KEY, OPTIONS_KEY, ORDER_KEY, WHERE_KEY};
