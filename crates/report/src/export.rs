//! JSON export and re-import of complete runs.
//!
//! The export carries the raw per-call records plus the configuration that
//! produced them. Optional fields that were absent at record time stay
//! absent in the file, and a re-imported run compares equal to the one
//! that was written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use guardmark_core::BenchmarkRun;

/// Schema version written into every export.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from writing or reading export files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The export file could not be written.
    #[error("failed to write {path}")]
    Write {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file exists but does not parse as an export document.
    #[error("malformed export document")]
    Malformed(#[from] serde_json::Error),
    /// The file was written by an incompatible build.
    #[error("unsupported export schema version {0}")]
    UnsupportedVersion(u32),
}

/// The on-disk shape of an exported run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Always [`SCHEMA_VERSION`] for files written by this build.
    pub schema_version: u32,
    /// The complete run, flattened alongside the version field.
    #[serde(flatten)]
    pub run: BenchmarkRun,
}

impl ExportDocument {
    /// Wrap a run for export.
    pub fn from_run(run: &BenchmarkRun) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            run: run.clone(),
        }
    }
}

/// Write a run to `path` as pretty-printed JSON.
pub fn write_export(run: &BenchmarkRun, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(&ExportDocument::from_run(run))?;
    fs::write(path, json).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a run back from an export file.
pub fn read_export(path: impl AsRef<Path>) -> Result<BenchmarkRun, ExportError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: ExportDocument = serde_json::from_str(&content)?;
    if document.schema_version != SCHEMA_VERSION {
        return Err(ExportError::UnsupportedVersion(document.schema_version));
    }
    Ok(document.run)
}
