//! CSV export for matched connections.
//!
//! Rows are appended without a header so repeated runs accumulate into the
//! same file. Columns follow the field order of [`Connection`].

use crate::error::Result;
use crate::filter::Connection;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default output file, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "taiwan_connections.csv";

/// Default output path as a `PathBuf`
pub fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

/// Append connections to a CSV file.
///
/// Returns the number of rows written. An empty slice leaves the file
/// untouched (it is not even created).
pub fn append_connections(path: &Path, connections: &[Connection]) -> Result<usize> {
    if connections.is_empty() {
        debug!(path = ?path, "No connections to export");
        return Ok(0);
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    for connection in connections {
        wtr.serialize(connection)?;
    }

    wtr.flush()?;
    info!(path = ?path, rows = connections.len(), "Appended connections");
    Ok(connections.len())
}
