// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Typed model invocation client for guardmark.
//!
//! This crate owns the wire contract with the inference backend and the
//! live [`Invoker`](guardmark_core::Invoker) implementation built on top of
//! it: one code path per benchmarked variant, each producing an
//! [`InvocationResult`](guardmark_core::InvocationResult) whether the call
//! succeeded, was blocked, or failed.
//!
//! # Modules
//!
//! - [`request`] - Typed invocation payload (camelCase wire shape)
//! - [`response`] - Typed response, stop reasons, token usage
//! - [`transport`] - The reqwest client and the measured timing window
//! - [`invoker`] - The live per-variant invoker and outcome classification

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod invoker;
pub mod request;
pub mod response;
pub mod transport;

pub use error::{ClientError, Result};
pub use invoker::{guardrail_mentioned_in, LiveInvoker};
pub use request::{ContentBlock, InferenceConfig, InvokeRequest, Message, Role};
pub use response::{InvokeResponse, StopReason, TokenUsage};
pub use transport::{ModelClient, TimedResponse, HEADER_GUARDRAIL_ID, HEADER_GUARDRAIL_VERSION};
