// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Run configuration.
//!
//! A [`RunConfig`] captures everything that shapes a benchmark run: the
//! target endpoint and model, the guardrail to attach, the prompt set,
//! iteration count, variant list, and inference parameters. It is assembled
//! by the CLI, validated once before the run starts, and carried unchanged
//! into the exported results.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::variant::Variant;

/// Default AWS region when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default model identifier when none is configured.
pub const DEFAULT_MODEL_ID: &str = "amazon.nova-pro-v1:0";

/// Identifies the backend guardrail to attach to guardrail-variant calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailConfig {
    /// The guardrail identifier understood by the backend.
    pub identifier: String,
    /// The guardrail version, e.g. `"1"` or `"DRAFT"`.
    pub version: String,
}

/// Full configuration of one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Human-readable label for the run, carried into reports and exports.
    pub label: String,
    /// AWS region the endpoint lives in.
    pub region: String,
    /// Model identifier passed in the invoke path.
    pub model_id: String,
    /// Explicit endpoint override. When absent the endpoint is derived
    /// from the region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Guardrail identifiers. Required whenever the run includes the
    /// guardrail variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardrail: Option<GuardrailConfig>,
    /// Name of the prompt set, for reporting only.
    pub prompt_set: String,
    /// The prompts to benchmark, in order.
    pub prompts: Vec<String>,
    /// Timed calls per (prompt, variant) pair.
    pub iterations: u32,
    /// Variants to benchmark. Invocation order follows [`Variant`] order
    /// regardless of the order given here.
    pub variants: Vec<Variant>,
    /// Maximum completion tokens requested per call.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling parameter. Omitted from request payloads when
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Whether to issue one unrecorded warm-up call per variant before
    /// the timed loop.
    pub warmup: bool,
}

impl RunConfig {
    /// The endpoint calls are issued against: the explicit override when
    /// set, otherwise the regional default.
    pub fn resolved_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }

    /// Number of timed calls the run will make: prompts × iterations ×
    /// variants.
    pub fn total_calls(&self) -> usize {
        self.prompts.len() * self.iterations as usize * self.variants.len()
    }

    /// Whether the run includes the given variant.
    pub fn has_variant(&self, variant: Variant) -> bool {
        self.variants.contains(&variant)
    }

    /// Reject configurations that cannot produce a meaningful run.
    ///
    /// Validation failures are fatal setup errors; nothing is invoked for
    /// an invalid configuration.
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(CoreError::config("region must not be empty"));
        }
        if self.model_id.trim().is_empty() {
            return Err(CoreError::config("model id must not be empty"));
        }
        if self.prompts.is_empty() {
            return Err(CoreError::config("prompt set is empty"));
        }
        if self.prompts.iter().any(|p| p.trim().is_empty()) {
            return Err(CoreError::config("prompt set contains an empty prompt"));
        }
        if self.iterations == 0 {
            return Err(CoreError::config("iterations must be at least 1"));
        }
        if self.variants.is_empty() {
            return Err(CoreError::config("no variants selected"));
        }
        if self.has_variant(Variant::Guardrail) && self.guardrail.is_none() {
            return Err(CoreError::config(
                "guardrail variant requires a guardrail identifier and version",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> RunConfig {
        RunConfig {
            label: "test run".to_string(),
            region: DEFAULT_REGION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            endpoint: None,
            guardrail: Some(GuardrailConfig {
                identifier: "gr-abc123".to_string(),
                version: "1".to_string(),
            }),
            prompt_set: "general".to_string(),
            prompts: vec!["What is the capital of France?".to_string()],
            iterations: 3,
            variants: vec![Variant::Baseline, Variant::Guardrail],
            max_tokens: 512,
            temperature: 0.7,
            top_p: Some(0.9),
            warmup: true,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_endpoint_derived_from_region() {
        let config = valid_config();
        assert_eq!(
            config.resolved_endpoint(),
            "https://bedrock-runtime.us-east-1.amazonaws.com"
        );
    }

    #[test]
    fn test_endpoint_override_wins_and_trailing_slash_stripped() {
        let mut config = valid_config();
        config.endpoint = Some("http://localhost:8080/".to_string());
        assert_eq!(config.resolved_endpoint(), "http://localhost:8080");
    }

    #[test]
    fn test_total_calls() {
        let mut config = valid_config();
        config.prompts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        config.iterations = 4;
        assert_eq!(config.total_calls(), 3 * 4 * 2);
    }

    #[test]
    fn test_rejects_empty_prompts() {
        let mut config = valid_config();
        config.prompts.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_prompt() {
        let mut config = valid_config();
        config.prompts.push("   ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let mut config = valid_config();
        config.iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_guardrail_variant_without_identifiers() {
        let mut config = valid_config();
        config.guardrail = None;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("guardrail"));
    }

    #[test]
    fn test_guardrail_optional_when_variant_absent() {
        let mut config = valid_config();
        config.guardrail = None;
        config.variants = vec![Variant::Baseline, Variant::LocalFilter];
        assert!(config.validate().is_ok());
    }
}
