//! JSON I/O handling for CLI
//!
//! - Input: one JSON query via stdin or a file
//! - Output: one JSON object per line on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Outcome of a command, as written to stdout
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Ok(Value),
    Error { code: String, message: String },
}

impl Response {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Response::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok(_))
    }

    pub fn to_json(&self) -> Value {
        match self {
            Response::Ok(data) => json!({"status": "ok", "data": data}),
            Response::Error { code, message } => {
                json!({"status": "error", "code": code, "message": message})
            }
        }
    }
}

/// Read a JSON request from stdin
///
/// The whole input is one document, so queries may span several lines.
pub fn read_request() -> CliResult<Value> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_request(&input)
}

/// Read a JSON request from a file
pub fn read_request_file(path: &Path) -> CliResult<Value> {
    let input = fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_request(&input)
}

fn parse_request(input: &str) -> CliResult<Value> {
    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(serde_json::from_str(input)?)
}

/// Write a response to stdout
pub fn write(response: &Response) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response.to_json())?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
