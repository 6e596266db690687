//! Deterministic call ordering for a benchmark run.
//!
//! The plan is prompt-major: for each prompt, each iteration runs every
//! selected variant back to back, so the variants being compared face the
//! backend under the most similar conditions the run can offer.

use guardmark_core::{RunConfig, Variant};

/// One timed call the runner will make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedCall {
    /// Index into the configured prompt list.
    pub prompt_index: usize,
    /// One-based iteration number within the (prompt, variant) pair.
    pub iteration: u32,
    /// The variant the call runs under.
    pub variant: Variant,
}

/// The ordered list of timed calls for one run.
#[derive(Debug, Clone)]
pub struct CallPlan {
    variants: Vec<Variant>,
    calls: Vec<PlannedCall>,
}

impl CallPlan {
    /// Build the plan for a configuration.
    ///
    /// Selected variants are ordered by [`Variant`] order regardless of
    /// how the configuration lists them, and duplicates collapse, so two
    /// configurations selecting the same variants produce the same plan.
    pub fn build(config: &RunConfig) -> Self {
        let variants: Vec<Variant> = Variant::ALL
            .iter()
            .copied()
            .filter(|v| config.has_variant(*v))
            .collect();

        let mut calls = Vec::with_capacity(
            config.prompts.len() * config.iterations as usize * variants.len(),
        );
        for prompt_index in 0..config.prompts.len() {
            for iteration in 1..=config.iterations {
                for &variant in &variants {
                    calls.push(PlannedCall {
                        prompt_index,
                        iteration,
                        variant,
                    });
                }
            }
        }

        Self { variants, calls }
    }

    /// The selected variants, in execution order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// The planned calls, in execution order.
    pub fn calls(&self) -> &[PlannedCall] {
        &self.calls
    }

    /// Number of timed calls in the plan.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether the plan contains no calls.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
