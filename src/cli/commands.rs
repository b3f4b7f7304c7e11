//! CLI command implementations
//!
//! Each command loads the configuration, opens the data directory catalog
//! and produces one `Response`. Catalog and query failures become error
//! responses; only configuration and I/O problems abort the process.

use std::path::Path;

use serde_json::{json, Value};

use crate::catalog::{ingest, CatalogError, DirectoryCatalog};
use crate::executor::QueryEngine;
use crate::observability::{log_event_with_fields, Event};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, read_request_file, write, Response};

/// Parse arguments, run the command and write its response
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let response = match cmd {
        Command::Add { config, id, source } => add(&config, &id, &source)?,
        Command::Remove { config, id } => remove(&config, &id)?,
        Command::List { config } => list(&config)?,
        Command::Query { config, file } => {
            let request = match file {
                Some(path) => read_request_file(&path)?,
                None => read_request()?,
            };
            query(&config, &request)?
        }
    };
    write(&response)
}

/// Ingest every course file under `source` as dataset `id`
///
/// Responds with the ids of all stored datasets.
pub fn add(config_path: &Path, id: &str, source: &Path) -> CliResult<Response> {
    let catalog = open_catalog(config_path)?;

    let result = ingest::sections_from_dir(source).and_then(|sections| {
        let rows = sections.len();
        let ids = catalog.add_dataset(id, &sections)?;
        log_event_with_fields(
            Event::DatasetAdded,
            &[("dataset", id), ("rows", rows.to_string().as_str())],
        );
        Ok(ids)
    });

    Ok(match result {
        Ok(ids) => Response::Ok(json!(ids)),
        Err(err) => catalog_failure(id, err),
    })
}

/// Delete dataset `id`
pub fn remove(config_path: &Path, id: &str) -> CliResult<Response> {
    let catalog = open_catalog(config_path)?;

    Ok(match catalog.remove_dataset(id) {
        Ok(removed) => {
            log_event_with_fields(Event::DatasetRemoved, &[("dataset", id)]);
            Response::Ok(json!(removed))
        }
        Err(err) => catalog_failure(id, err),
    })
}

/// List stored datasets
pub fn list(config_path: &Path) -> CliResult<Response> {
    let catalog = open_catalog(config_path)?;

    Ok(match catalog.list_datasets() {
        Ok(datasets) => Response::Ok(serde_json::to_value(datasets)?),
        Err(err) => catalog_failure("*", err),
    })
}

/// Run one query against the stored datasets
pub fn query(config_path: &Path, request: &Value) -> CliResult<Response> {
    let catalog = open_catalog(config_path)?;
    let engine = QueryEngine::new(&catalog);

    Ok(match engine.perform_query(request) {
        Ok(output) => Response::Ok(output.to_json()),
        Err(err) => Response::error(err.code().code(), err.message()),
    })
}

fn open_catalog(config_path: &Path) -> CliResult<DirectoryCatalog> {
    let config = Config::load(config_path)?;
    DirectoryCatalog::open(config.data_path()).map_err(|e| {
        CliError::command_failed(format!(
            "Failed to open data directory {}: {}",
            config.data_dir, e
        ))
    })
}

fn catalog_failure(id: &str, err: CatalogError) -> Response {
    log_event_with_fields(
        Event::DatasetFailed,
        &[("code", err.code()), ("dataset", id), ("message", err.to_string().as_str())],
    );
    Response::error(err.code(), err.to_string())
}
