//! Terminal report rendering and JSON export for benchmark runs.
//!
//! Rendering is a pure function from a run and its analysis to a string;
//! nothing here performs network calls or recomputes statistics. Export
//! writes the raw per-call records rather than derived numbers, so an
//! exported file can be re-analyzed later by a newer build.
//!
//! # Modules
//!
//! - [`render`] - The human-readable terminal report
//! - [`export`] - JSON export and re-import of complete runs

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod export;
pub mod render;

pub use export::{read_export, write_export, ExportDocument, ExportError, SCHEMA_VERSION};
pub use render::render;
