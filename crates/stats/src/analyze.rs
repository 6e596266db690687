//! Run-level analysis: per-variant rollups, overhead comparisons, and
//! per-prompt latency rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use guardmark_core::{BenchmarkRun, InvocationResult, Variant};

use crate::summary::LatencySummary;

/// Rollup of one variant's recorded results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantAnalysis {
    /// The variant the rollup describes.
    pub variant: Variant,
    /// Every recorded call, successful or not.
    pub total: usize,
    /// Calls that round-tripped without an error.
    pub successful: usize,
    /// Calls that failed with a transport or backend error.
    pub failed: usize,
    /// Calls the guardrail intervened on, counted across all recorded
    /// calls including failed ones.
    pub blocked: usize,
    /// `blocked` as a percentage of `total`. Zero when nothing ran.
    pub blocked_rate: f64,
    /// Latency statistics over successful calls. `None` when none
    /// succeeded.
    pub latency: Option<LatencySummary>,
    /// Mean local PII detection time over successful calls, in
    /// milliseconds. `None` for variants that never ran the local filter.
    pub mean_pii_check_ms: Option<f64>,
}

impl VariantAnalysis {
    /// Roll up one variant's recorded results.
    ///
    /// Failed calls are excluded from latency samples but still counted
    /// toward totals and the blocked rate, so a guardrail rejection that
    /// surfaces as a backend error is not lost from the intervention count.
    pub fn from_results(variant: Variant, results: &[InvocationResult]) -> Self {
        let total = results.len();
        let successful = results.iter().filter(|r| r.is_success()).count();
        let blocked = results.iter().filter(|r| r.blocked).count();
        let blocked_rate = if total == 0 {
            0.0
        } else {
            blocked as f64 / total as f64 * 100.0
        };

        let samples: Vec<f64> = results
            .iter()
            .filter(|r| r.is_success())
            .map(|r| r.total_ms)
            .collect();
        let latency = LatencySummary::from_samples(&samples);

        let pii_samples: Vec<f64> = results
            .iter()
            .filter(|r| r.is_success())
            .map(|r| r.pii_check_ms)
            .collect();
        let mean_pii_check_ms = if pii_samples.iter().any(|ms| *ms > 0.0) {
            Some(pii_samples.iter().sum::<f64>() / pii_samples.len() as f64)
        } else {
            None
        };

        Self {
            variant,
            total,
            successful,
            failed: total - successful,
            blocked,
            blocked_rate,
            latency,
            mean_pii_check_ms,
        }
    }
}

/// Mean-latency overhead of one variant over another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadComparison {
    /// The variant the candidate is measured against.
    pub baseline: Variant,
    /// The variant whose overhead is reported.
    pub candidate: Variant,
    /// Mean total latency of the baseline, in milliseconds.
    pub baseline_mean: f64,
    /// Mean total latency of the candidate, in milliseconds.
    pub candidate_mean: f64,
    /// `candidate_mean - baseline_mean`. Negative when the candidate
    /// was faster.
    pub delta_ms: f64,
    /// `delta_ms` as a percentage of the baseline mean. Zero when the
    /// baseline mean is zero.
    pub delta_pct: f64,
}

impl OverheadComparison {
    /// Compare two variant means.
    pub fn new(
        baseline: Variant,
        candidate: Variant,
        baseline_mean: f64,
        candidate_mean: f64,
    ) -> Self {
        let delta_ms = candidate_mean - baseline_mean;
        let delta_pct = if baseline_mean == 0.0 {
            0.0
        } else {
            delta_ms / baseline_mean * 100.0
        };
        Self {
            baseline,
            candidate,
            baseline_mean,
            candidate_mean,
            delta_ms,
            delta_pct,
        }
    }
}

/// Per-prompt latency means across variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRow {
    /// The truncated prompt text identifying the row.
    pub prompt_label: String,
    /// Mean total latency of successful calls per variant. A variant with
    /// no successful calls for this prompt is absent from the map.
    pub mean_by_variant: BTreeMap<Variant, f64>,
    /// Whether any call for this prompt, under any variant, was blocked.
    pub ever_blocked: bool,
}

/// Everything the report needs, derived once from a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunAnalysis {
    /// Per-variant rollups, in [`Variant`] order.
    pub variants: Vec<VariantAnalysis>,
    /// Overhead comparisons between variant pairs that both produced
    /// latency data.
    pub comparisons: Vec<OverheadComparison>,
    /// Per-prompt rows, in first-recorded order.
    pub prompts: Vec<PromptRow>,
}

/// Analyze a completed run.
pub fn analyze(run: &BenchmarkRun) -> RunAnalysis {
    let variants: Vec<VariantAnalysis> = run
        .results
        .iter()
        .map(|(variant, results)| VariantAnalysis::from_results(*variant, results))
        .collect();
    let comparisons = build_comparisons(&variants);
    let prompts = build_prompt_rows(run);
    RunAnalysis {
        variants,
        comparisons,
        prompts,
    }
}

/// Pair up variants for overhead reporting.
///
/// Each protected variant with latency data is compared against the
/// unprotected baseline, and the two protection mechanisms are compared
/// directly when both produced data.
fn build_comparisons(variants: &[VariantAnalysis]) -> Vec<OverheadComparison> {
    let mean_of = |wanted: Variant| {
        variants
            .iter()
            .find(|v| v.variant == wanted)
            .and_then(|v| v.latency.as_ref())
            .map(|l| l.mean)
    };

    let mut comparisons = Vec::new();
    if let Some(baseline_mean) = mean_of(Variant::Baseline) {
        for candidate in [Variant::Guardrail, Variant::LocalFilter] {
            if let Some(candidate_mean) = mean_of(candidate) {
                comparisons.push(OverheadComparison::new(
                    Variant::Baseline,
                    candidate,
                    baseline_mean,
                    candidate_mean,
                ));
            }
        }
    }
    if let (Some(filter_mean), Some(guardrail_mean)) =
        (mean_of(Variant::LocalFilter), mean_of(Variant::Guardrail))
    {
        comparisons.push(OverheadComparison::new(
            Variant::LocalFilter,
            Variant::Guardrail,
            filter_mean,
            guardrail_mean,
        ));
    }
    comparisons
}

/// Group results by prompt label, preserving first-recorded order.
fn build_prompt_rows(run: &BenchmarkRun) -> Vec<PromptRow> {
    let mut order: Vec<&str> = Vec::new();
    for results in run.results.values() {
        for result in results {
            if !order.contains(&result.prompt_label.as_str()) {
                order.push(&result.prompt_label);
            }
        }
    }

    order
        .into_iter()
        .map(|label| {
            let mut mean_by_variant = BTreeMap::new();
            let mut ever_blocked = false;
            for (variant, results) in &run.results {
                let samples: Vec<f64> = results
                    .iter()
                    .filter(|r| r.prompt_label == label && r.is_success())
                    .map(|r| r.total_ms)
                    .collect();
                if !samples.is_empty() {
                    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
                    mean_by_variant.insert(*variant, mean);
                }
                if results.iter().any(|r| r.prompt_label == label && r.blocked) {
                    ever_blocked = true;
                }
            }
            PromptRow {
                prompt_label: label.to_string(),
                mean_by_variant,
                ever_blocked,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardmark_core::{GuardrailConfig, RunConfig, DEFAULT_MODEL_ID, DEFAULT_REGION};

    fn config(variants: Vec<Variant>) -> RunConfig {
        RunConfig {
            label: "unit".to_string(),
            region: DEFAULT_REGION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            endpoint: None,
            guardrail: Some(GuardrailConfig {
                identifier: "gr-1".to_string(),
                version: "1".to_string(),
            }),
            prompt_set: "general".to_string(),
            prompts: vec!["p1".to_string(), "p2".to_string()],
            iterations: 2,
            variants,
            max_tokens: 64,
            temperature: 0.0,
            top_p: None,
            warmup: false,
        }
    }

    fn ok(prompt: &str, variant: Variant, total_ms: f64) -> InvocationResult {
        InvocationResult::builder(prompt, variant)
            .latency_ms(total_ms)
            .build()
    }

    fn failed(prompt: &str, variant: Variant, message: &str) -> InvocationResult {
        InvocationResult::builder(prompt, variant).error(message).build()
    }

    #[test]
    fn test_variant_rollup_counts_and_summary() {
        let results = vec![
            ok("p1", Variant::Baseline, 100.0),
            ok("p2", Variant::Baseline, 200.0),
            failed("p1", Variant::Baseline, "connection refused"),
        ];
        let rollup = VariantAnalysis::from_results(Variant::Baseline, &results);
        assert_eq!(rollup.total, 3);
        assert_eq!(rollup.successful, 2);
        assert_eq!(rollup.failed, 1);
        assert_eq!(rollup.blocked, 0);
        let latency = rollup.latency.unwrap();
        assert_eq!(latency.count, 2);
        assert_eq!(latency.mean, 150.0);
    }

    #[test]
    fn test_failed_calls_excluded_from_latency_samples() {
        let results = vec![
            ok("p1", Variant::Baseline, 100.0),
            InvocationResult::builder("p2", Variant::Baseline)
                .latency_ms(9000.0)
                .error("timeout")
                .build(),
        ];
        let rollup = VariantAnalysis::from_results(Variant::Baseline, &results);
        let latency = rollup.latency.unwrap();
        assert_eq!(latency.count, 1);
        assert_eq!(latency.mean, 100.0);
    }

    #[test]
    fn test_blocked_counted_even_on_failed_calls() {
        let results = vec![
            ok("p1", Variant::Guardrail, 100.0),
            ok("p2", Variant::Guardrail, 110.0),
            InvocationResult::builder("p3", Variant::Guardrail)
                .blocked(true)
                .error("backend returned 400: guardrail rejected the request")
                .build(),
            InvocationResult::builder("p4", Variant::Guardrail)
                .latency_ms(90.0)
                .blocked(true)
                .build(),
        ];
        let rollup = VariantAnalysis::from_results(Variant::Guardrail, &results);
        assert_eq!(rollup.blocked, 2);
        assert_eq!(rollup.blocked_rate, 50.0);
        assert_eq!(rollup.successful, 3);
    }

    #[test]
    fn test_all_failed_yields_no_summary() {
        let results = vec![
            failed("p1", Variant::Baseline, "refused"),
            failed("p2", Variant::Baseline, "refused"),
        ];
        let rollup = VariantAnalysis::from_results(Variant::Baseline, &results);
        assert_eq!(rollup.failed, 2);
        assert_eq!(rollup.latency, None);
        assert_eq!(rollup.blocked_rate, 0.0);
    }

    #[test]
    fn test_empty_results_yield_zeroed_rollup() {
        let rollup = VariantAnalysis::from_results(Variant::Baseline, &[]);
        assert_eq!(rollup.total, 0);
        assert_eq!(rollup.blocked_rate, 0.0);
        assert_eq!(rollup.latency, None);
        assert_eq!(rollup.mean_pii_check_ms, None);
    }

    #[test]
    fn test_mean_pii_check_only_when_filter_ran() {
        let plain = VariantAnalysis::from_results(
            Variant::Baseline,
            &[ok("p1", Variant::Baseline, 100.0)],
        );
        assert_eq!(plain.mean_pii_check_ms, None);

        let filtered = VariantAnalysis::from_results(
            Variant::LocalFilter,
            &[
                InvocationResult::builder("p1", Variant::LocalFilter)
                    .latency_ms(100.0)
                    .pii_check_ms(0.2)
                    .build(),
                InvocationResult::builder("p2", Variant::LocalFilter)
                    .latency_ms(100.0)
                    .pii_check_ms(0.4)
                    .build(),
            ],
        );
        let mean = filtered.mean_pii_check_ms.unwrap();
        assert!((mean - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_overhead_percentage_is_exact_for_round_numbers() {
        let comparison =
            OverheadComparison::new(Variant::Baseline, Variant::Guardrail, 100.0, 120.0);
        assert_eq!(comparison.delta_ms, 20.0);
        assert_eq!(comparison.delta_pct, 20.0);
    }

    #[test]
    fn test_overhead_can_be_negative() {
        let comparison =
            OverheadComparison::new(Variant::Baseline, Variant::LocalFilter, 200.0, 150.0);
        assert_eq!(comparison.delta_ms, -50.0);
        assert_eq!(comparison.delta_pct, -25.0);
    }

    #[test]
    fn test_zero_baseline_mean_pins_percentage_to_zero() {
        let comparison =
            OverheadComparison::new(Variant::Baseline, Variant::Guardrail, 0.0, 50.0);
        assert_eq!(comparison.delta_pct, 0.0);
    }

    #[test]
    fn test_analyze_builds_baseline_comparisons_in_variant_order() {
        let mut run = BenchmarkRun::new(config(Variant::ALL.to_vec()));
        run.record(ok("p1", Variant::Baseline, 100.0));
        run.record(ok("p1", Variant::Guardrail, 130.0));
        run.record(ok("p1", Variant::LocalFilter, 105.0));

        let analysis = analyze(&run);
        assert_eq!(analysis.variants.len(), 3);
        assert_eq!(analysis.comparisons.len(), 3);

        let vs_guardrail = &analysis.comparisons[0];
        assert_eq!(vs_guardrail.baseline, Variant::Baseline);
        assert_eq!(vs_guardrail.candidate, Variant::Guardrail);
        assert_eq!(vs_guardrail.delta_ms, 30.0);

        let vs_filter = &analysis.comparisons[1];
        assert_eq!(vs_filter.candidate, Variant::LocalFilter);
        assert_eq!(vs_filter.delta_ms, 5.0);

        let direct = &analysis.comparisons[2];
        assert_eq!(direct.baseline, Variant::LocalFilter);
        assert_eq!(direct.candidate, Variant::Guardrail);
        assert_eq!(direct.delta_ms, 25.0);
    }

    #[test]
    fn test_no_comparisons_without_baseline_data() {
        let mut run = BenchmarkRun::new(config(vec![Variant::Guardrail]));
        run.record(ok("p1", Variant::Guardrail, 130.0));

        let analysis = analyze(&run);
        assert!(analysis.comparisons.is_empty());
    }

    #[test]
    fn test_direct_comparison_survives_missing_baseline() {
        let mut run = BenchmarkRun::new(config(vec![
            Variant::Guardrail,
            Variant::LocalFilter,
        ]));
        run.record(ok("p1", Variant::Guardrail, 130.0));
        run.record(ok("p1", Variant::LocalFilter, 110.0));

        let analysis = analyze(&run);
        assert_eq!(analysis.comparisons.len(), 1);
        assert_eq!(analysis.comparisons[0].baseline, Variant::LocalFilter);
        assert_eq!(analysis.comparisons[0].candidate, Variant::Guardrail);
    }

    #[test]
    fn test_prompt_rows_preserve_first_recorded_order() {
        let mut run = BenchmarkRun::new(config(vec![Variant::Baseline, Variant::Guardrail]));
        run.record(ok("first prompt", Variant::Baseline, 100.0));
        run.record(ok("second prompt", Variant::Baseline, 110.0));
        run.record(ok("first prompt", Variant::Baseline, 120.0));
        run.record(ok("first prompt", Variant::Guardrail, 140.0));

        let analysis = analyze(&run);
        assert_eq!(analysis.prompts.len(), 2);
        assert_eq!(analysis.prompts[0].prompt_label, "first prompt");
        assert_eq!(analysis.prompts[1].prompt_label, "second prompt");

        let first = &analysis.prompts[0];
        assert_eq!(first.mean_by_variant[&Variant::Baseline], 110.0);
        assert_eq!(first.mean_by_variant[&Variant::Guardrail], 140.0);
        assert!(!analysis.prompts[1].mean_by_variant.contains_key(&Variant::Guardrail));
    }

    #[test]
    fn test_prompt_row_marks_any_blocked_call() {
        let mut run = BenchmarkRun::new(config(vec![Variant::Baseline, Variant::Guardrail]));
        run.record(ok("p1", Variant::Baseline, 100.0));
        run.record(
            InvocationResult::builder("p1", Variant::Guardrail)
                .latency_ms(90.0)
                .blocked(true)
                .build(),
        );
        run.record(ok("p2", Variant::Guardrail, 95.0));

        let analysis = analyze(&run);
        assert!(analysis.prompts[0].ever_blocked);
        assert!(!analysis.prompts[1].ever_blocked);
    }

    #[test]
    fn test_prompt_row_omits_variant_with_only_failures() {
        let mut run = BenchmarkRun::new(config(vec![Variant::Baseline, Variant::Guardrail]));
        run.record(ok("p1", Variant::Baseline, 100.0));
        run.record(failed("p1", Variant::Guardrail, "refused"));

        let analysis = analyze(&run);
        let row = &analysis.prompts[0];
        assert!(row.mean_by_variant.contains_key(&Variant::Baseline));
        assert!(!row.mean_by_variant.contains_key(&Variant::Guardrail));
    }
}
