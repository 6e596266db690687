// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Domain model for the guardmark benchmark suite.
//!
//! This crate defines the vocabulary shared by every other guardmark crate:
//! the benchmarked [`Variant`]s, the per-call [`InvocationResult`], the
//! [`RunConfig`] that fully describes a benchmark run, the [`BenchmarkRun`]
//! container the runner populates, and the [`Invoker`] seam through which the
//! runner issues calls (so tests can substitute a scripted invoker for the
//! real HTTP client).
//!
//! # Modules
//!
//! - [`variant`] - The benchmarked configurations
//! - [`pii`] - PII category vocabulary shared by detector and results
//! - [`result`] - The immutable per-call measurement record
//! - [`config`] - Run configuration and validation
//! - [`run`] - The in-memory container for one benchmark run
//! - [`invoke`] - The invoker trait (dependency-injection seam)
//! - [`prompts`] - Built-in prompt sets and the prompt-file loader
//! - [`error`] - The crate-wide error type

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod invoke;
pub mod pii;
pub mod prompts;
pub mod result;
pub mod run;
pub mod variant;

pub use config::{GuardrailConfig, RunConfig, DEFAULT_MODEL_ID, DEFAULT_REGION};
pub use error::{CoreError, Result};
pub use invoke::Invoker;
pub use pii::PiiCategory;
pub use result::{prompt_label, InvocationResult};
pub use run::BenchmarkRun;
pub use variant::Variant;
