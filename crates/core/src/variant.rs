// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! The benchmarked invocation configurations.

use serde::{Deserialize, Serialize};

/// One benchmarked configuration of the model invocation path.
///
/// The declaration order is load-bearing: it is the order in which variants
/// are invoked within each (prompt, iteration) round, so that external drift
/// (time-of-day load on the backend) affects all variants comparably, and it
/// is the order in which variants appear in reports and exports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// No guardrail and no local filtering; the latency floor.
    Baseline,
    /// Backend guardrail attached to the invocation.
    Guardrail,
    /// Application-level regex PII detection before and after the call.
    LocalFilter,
}

impl Variant {
    /// All variants in invocation order.
    pub const ALL: [Variant; 3] = [Variant::Baseline, Variant::Guardrail, Variant::LocalFilter];

    /// Stable snake_case key, as used in the JSON export.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Baseline => "baseline",
            Variant::Guardrail => "guardrail",
            Variant::LocalFilter => "local_filter",
        }
    }

    /// Human-readable name for reports and progress output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Variant::Baseline => "no protection",
            Variant::Guardrail => "with guardrail",
            Variant::LocalFilter => "local regex filter",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
