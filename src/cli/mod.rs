//! CLI module for insightdb
//!
//! Provides command-line interface for:
//! - add: ingest course files as a dataset
//! - remove: delete a dataset
//! - list: list stored datasets
//! - query: one-shot query execution

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{add, list, query, remove, run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, read_request_file, write, Response};
