// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! The record produced by a single measured invocation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::pii::PiiCategory;
use crate::variant::Variant;

/// Maximum number of characters of a prompt carried into result records.
const PROMPT_LABEL_CHARS: usize = 50;

/// Truncate a prompt to a short label for result records and reports.
///
/// Prompts longer than 50 characters are cut at a character boundary and
/// suffixed with `...`; shorter prompts pass through unchanged.
pub fn prompt_label(prompt: &str) -> String {
    let mut chars = prompt.char_indices();
    match chars.nth(PROMPT_LABEL_CHARS) {
        Some((byte_idx, _)) => format!("{}...", &prompt[..byte_idx]),
        None => prompt.to_string(),
    }
}

/// The outcome of one timed model invocation.
///
/// A result is recorded for every attempted call, successful or not. Failed
/// calls carry the error text in [`error`](Self::error) and keep whatever
/// partial timings were observed before the failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    /// Truncated prompt text identifying the call in reports.
    pub prompt_label: String,
    /// The configuration under which the call was made.
    pub variant: Variant,
    /// Wall-clock milliseconds for the remote round trip, including
    /// response body parsing.
    pub latency_ms: f64,
    /// Milliseconds spent in local PII detection, both passes combined.
    /// Zero for variants without local filtering.
    pub pii_check_ms: f64,
    /// `latency_ms + pii_check_ms`.
    pub total_ms: f64,
    /// Input token count reported by the backend, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    /// Output token count reported by the backend, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
    /// PII categories found by the local filter across both passes.
    #[serde(default)]
    pub pii_found: BTreeSet<PiiCategory>,
    /// Whether the backend guardrail intervened on this call.
    pub blocked: bool,
    /// Error text when the call failed, `None` on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InvocationResult {
    /// Start building a result for one call.
    pub fn builder(prompt: &str, variant: Variant) -> InvocationResultBuilder {
        InvocationResultBuilder {
            prompt_label: prompt_label(prompt),
            variant,
            latency_ms: 0.0,
            pii_check_ms: 0.0,
            input_tokens: None,
            output_tokens: None,
            pii_found: BTreeSet::new(),
            blocked: false,
            error: None,
        }
    }

    /// Whether this call completed without a transport or backend error.
    ///
    /// Guardrail interventions count as successes; the call round-tripped
    /// and its latency is a valid sample.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Builder for [`InvocationResult`].
///
/// `total_ms` is derived at [`build`](Self::build) time so the aggregate can
/// never drift from its parts.
#[derive(Debug)]
pub struct InvocationResultBuilder {
    prompt_label: String,
    variant: Variant,
    latency_ms: f64,
    pii_check_ms: f64,
    input_tokens: Option<u64>,
    output_tokens: Option<u64>,
    pii_found: BTreeSet<PiiCategory>,
    blocked: bool,
    error: Option<String>,
}

impl InvocationResultBuilder {
    /// Set the remote round-trip time. Negative inputs clamp to zero.
    pub fn latency_ms(mut self, ms: f64) -> Self {
        self.latency_ms = ms.max(0.0);
        self
    }

    /// Set the combined local PII detection time. Negative inputs clamp
    /// to zero.
    pub fn pii_check_ms(mut self, ms: f64) -> Self {
        self.pii_check_ms = ms.max(0.0);
        self
    }

    /// Record token usage reported by the backend.
    pub fn tokens(mut self, input: Option<u64>, output: Option<u64>) -> Self {
        self.input_tokens = input;
        self.output_tokens = output;
        self
    }

    /// Record PII categories found by the local filter.
    pub fn pii_found(mut self, categories: BTreeSet<PiiCategory>) -> Self {
        self.pii_found = categories;
        self
    }

    /// Mark the call as blocked by a guardrail intervention.
    pub fn blocked(mut self, blocked: bool) -> Self {
        self.blocked = blocked;
        self
    }

    /// Record a transport or backend error.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Finish the record, deriving `total_ms`.
    pub fn build(self) -> InvocationResult {
        InvocationResult {
            prompt_label: self.prompt_label,
            variant: self.variant,
            latency_ms: self.latency_ms,
            total_ms: self.latency_ms + self.pii_check_ms,
            pii_check_ms: self.pii_check_ms,
            input_tokens: self.input_tokens,
            output_tokens: self.output_tokens,
            pii_found: self.pii_found,
            blocked: self.blocked,
            error: self.error,
        }
    }
}
