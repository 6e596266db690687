//! Pure analysis over a completed benchmark run.
//!
//! Everything in this crate is a total function of its input: summaries,
//! overhead comparisons, and per-prompt aggregates are computed from a
//! [`BenchmarkRun`](guardmark_core::BenchmarkRun) without mutating it, and
//! no value is ever invented for missing data. A variant with no
//! successful samples gets `None` where its summary would be, never a
//! fabricated zero.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analyze;
pub mod summary;

pub use analyze::{analyze, OverheadComparison, PromptRow, RunAnalysis, VariantAnalysis};
pub use summary::LatencySummary;
