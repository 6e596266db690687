// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! The invoker seam between the benchmark runner and the model backend.

use async_trait::async_trait;

use crate::result::InvocationResult;
use crate::variant::Variant;

/// Issues one model call under a given variant and reports its outcome.
///
/// Implementations never fail at the call boundary: transport errors,
/// malformed responses, and backend rejections are all captured inside the
/// returned [`InvocationResult`] so the benchmark loop can keep going.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Invoke the model with `prompt` under `variant` and record the
    /// outcome.
    async fn invoke(&self, variant: Variant, prompt: &str) -> InvocationResult;
}
