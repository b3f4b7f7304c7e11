//! CLI argument definitions using clap
//!
//! Commands:
//! - insightdb add --config <path> --id <id> --source <dir>
//! - insightdb remove --config <path> --id <id>
//! - insightdb list --config <path>
//! - insightdb query --config <path> [--file <query.json>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// insightdb - strict, deterministic queries over course section datasets
#[derive(Parser, Debug)]
#[command(name = "insightdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ingest a directory of course files as a new dataset
    Add {
        /// Path to configuration file
        #[arg(long, default_value = "./insightdb.json")]
        config: PathBuf,

        /// Dataset id (no underscores)
        #[arg(long)]
        id: String,

        /// Directory holding the course files
        #[arg(long)]
        source: PathBuf,
    },

    /// Delete a dataset
    Remove {
        /// Path to configuration file
        #[arg(long, default_value = "./insightdb.json")]
        config: PathBuf,

        /// Dataset id
        #[arg(long)]
        id: String,
    },

    /// List stored datasets
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./insightdb.json")]
        config: PathBuf,
    },

    /// Run one query and exit
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./insightdb.json")]
        config: PathBuf,

        /// Read the query from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
