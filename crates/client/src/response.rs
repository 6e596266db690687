// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! The typed invocation response.
//!
//! Every section is optional: a response with no output, no stop reason,
//! or no usage block still parses, because absence of optional data is
//! never a failure here.

use serde::{Deserialize, Serialize};

use crate::request::ContentBlock;

/// Stop reasons the backend can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The model finished its turn normally.
    EndTurn,
    /// Generation hit the token limit.
    MaxTokens,
    /// Generation hit a stop sequence.
    StopSequence,
    /// The backend's content filter altered or suppressed the output.
    ContentFiltered,
    /// The guardrail intervened on the request or response.
    GuardrailIntervened,
    /// Any value this client does not recognize.
    #[serde(other)]
    Unrecognized,
}

impl StopReason {
    /// Whether this stop reason signals a guardrail intervention.
    ///
    /// This is the single place the designated intervention value is
    /// known; blocked classification everywhere else goes through here.
    pub fn is_intervention(&self) -> bool {
        matches!(self, StopReason::GuardrailIntervened)
    }
}

/// Token counts reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    /// Tokens consumed by the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    /// Tokens generated in the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
}

/// The generated message inside a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMessage {
    /// The message's content blocks.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// The output section of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// The generated message, when one was produced.
    #[serde(default)]
    pub message: Option<OutputMessage>,
}

/// A model invocation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeResponse {
    /// The generated output, absent when the call produced none.
    #[serde(default)]
    pub output: Option<Output>,
    /// Why generation stopped, when reported.
    #[serde(default)]
    pub stop_reason: Option<StopReason>,
    /// Token usage, when reported.
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl InvokeResponse {
    /// The first text block of the generated message, `""` when absent.
    pub fn output_text(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|output| output.message.as_ref())
            .and_then(|message| message.content.first())
            .map(|block| block.text.as_str())
            .unwrap_or("")
    }

    /// Whether the reported stop reason signals an intervention.
    pub fn is_intervention(&self) -> bool {
        self.stop_reason
            .map_or(false, |reason| reason.is_intervention())
    }

    /// Input and output token counts, when reported.
    pub fn token_counts(&self) -> (Option<u64>, Option<u64>) {
        match &self.usage {
            Some(usage) => (usage.input_tokens, usage.output_tokens),
            None => (None, None),
        }
    }
}
