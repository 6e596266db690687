//! Benchmark planning and execution.
//!
//! This crate turns a validated [`RunConfig`](guardmark_core::RunConfig)
//! into an ordered call plan and drives it through an
//! [`Invoker`](guardmark_core::Invoker), one call at a time. Sequential
//! execution is deliberate: overlapping calls would contend for the same
//! connection pool and poison the latency samples.
//!
//! # Modules
//!
//! - [`plan`] - Deterministic call ordering for a run
//! - [`progress`] - Observer hooks for long-running executions
//! - [`runner`] - The execution loop itself

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod plan;
pub mod progress;
pub mod runner;

pub use plan::{CallPlan, PlannedCall};
pub use progress::{NullProgress, ProgressSink};
pub use runner::Runner;
