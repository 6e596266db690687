// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! The live invoker: one code path per benchmarked variant.

use std::borrow::Cow;

use async_trait::async_trait;
use tracing::warn;

use guardmark_core::{GuardrailConfig, InvocationResult, Invoker, Variant};
use guardmark_detector::PiiDetector;

use crate::transport::{ModelClient, TimedResponse};

/// Whether an error's text indicates the guardrail itself rejected the call.
///
/// The backend conflates two channels for the same logical outcome: most
/// interventions arrive as a normal response carrying an intervention stop
/// reason, but some surface as a validation error whose message names the
/// guardrail. This function is that translation, kept in one place so call
/// sites never grow their own string checks.
pub fn guardrail_mentioned_in(error_text: &str) -> bool {
    error_text.to_lowercase().contains("guardrail")
}

/// Invoker backed by the real HTTP transport.
///
/// Per the [`Invoker`] contract, nothing escapes a call boundary: every
/// transport or backend failure is recorded on the returned result and the
/// benchmark loop keeps going.
pub struct LiveInvoker {
    client: ModelClient,
    detector: PiiDetector,
    guardrail: Option<GuardrailConfig>,
}

impl LiveInvoker {
    /// Assemble an invoker from its parts.
    ///
    /// `guardrail` must be present when the guardrail variant will run;
    /// run-config validation enforces that before anything is invoked.
    pub fn new(
        client: ModelClient,
        detector: PiiDetector,
        guardrail: Option<GuardrailConfig>,
    ) -> Self {
        Self {
            client,
            detector,
            guardrail,
        }
    }

    async fn invoke_baseline(&self, prompt: &str) -> InvocationResult {
        let TimedResponse {
            latency_ms,
            outcome,
        } = self.client.invoke(prompt, None).await;

        let builder = InvocationResult::builder(prompt, Variant::Baseline).latency_ms(latency_ms);
        match outcome {
            Ok(response) => {
                let (input, output) = response.token_counts();
                builder.tokens(input, output).build()
            }
            Err(err) => {
                warn!(variant = %Variant::Baseline, error = %err, "invocation failed");
                builder.error(err.to_string()).build()
            }
        }
    }

    async fn invoke_guardrail(&self, prompt: &str) -> InvocationResult {
        let TimedResponse {
            latency_ms,
            outcome,
        } = self.client.invoke(prompt, self.guardrail.as_ref()).await;

        let builder = InvocationResult::builder(prompt, Variant::Guardrail).latency_ms(latency_ms);
        match outcome {
            Ok(response) => {
                let (input, output) = response.token_counts();
                builder
                    .tokens(input, output)
                    .blocked(response.is_intervention())
                    .build()
            }
            Err(err) => {
                let text = err.to_string();
                warn!(variant = %Variant::Guardrail, error = %text, "invocation failed");
                builder
                    .blocked(guardrail_mentioned_in(&text))
                    .error(text)
                    .build()
            }
        }
    }

    async fn invoke_local_filter(&self, prompt: &str) -> InvocationResult {
        let input_detection = self.detector.detect(prompt);
        let processed: Cow<'_, str> = if input_detection.has_pii() {
            Cow::Owned(self.detector.anonymize(prompt))
        } else {
            Cow::Borrowed(prompt)
        };

        let TimedResponse {
            latency_ms,
            outcome,
        } = self.client.invoke(&processed, None).await;

        // Result records carry the original prompt's label, not the
        // anonymized text. The local filter never blocks; it redacts.
        let mut pii_check_ms = input_detection.elapsed_ms();
        let mut pii_found = input_detection.categories;

        match outcome {
            Ok(response) => {
                let output_detection = self.detector.detect(response.output_text());
                pii_check_ms += output_detection.elapsed_ms();
                pii_found.extend(output_detection.categories);

                let (input, output) = response.token_counts();
                InvocationResult::builder(prompt, Variant::LocalFilter)
                    .latency_ms(latency_ms)
                    .pii_check_ms(pii_check_ms)
                    .pii_found(pii_found)
                    .tokens(input, output)
                    .build()
            }
            Err(err) => {
                // Only the input pass ran to completion; its time and
                // findings are what the record carries.
                warn!(variant = %Variant::LocalFilter, error = %err, "invocation failed");
                InvocationResult::builder(prompt, Variant::LocalFilter)
                    .latency_ms(latency_ms)
                    .pii_check_ms(pii_check_ms)
                    .pii_found(pii_found)
                    .error(err.to_string())
                    .build()
            }
        }
    }
}

#[async_trait]
impl Invoker for LiveInvoker {
    async fn invoke(&self, variant: Variant, prompt: &str) -> InvocationResult {
        match variant {
            Variant::Baseline => self.invoke_baseline(prompt).await,
            Variant::Guardrail => self.invoke_guardrail(prompt).await,
            Variant::LocalFilter => self.invoke_local_filter(prompt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guardrail_mentioned_in_is_case_insensitive() {
        assert!(guardrail_mentioned_in(
            "backend returned 400 Bad Request: Guardrail blocked the request"
        ));
        assert!(guardrail_mentioned_in("GUARDRAIL_INTERVENED"));
        assert!(!guardrail_mentioned_in("connection reset by peer"));
        assert!(!guardrail_mentioned_in(""));
    }
}
