//! insightdb - A strict, deterministic query engine over course section datasets
//!
//! A query is a JSON document naming one dataset through its qualified
//! columns (`<id>_<field>`), a boolean filter tree and projection options.
//! Queries are validated completely before any record is read.

pub mod catalog;
pub mod cli;
pub mod executor;
pub mod observability;
pub mod query;
pub mod record;
