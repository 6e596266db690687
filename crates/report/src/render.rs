//! The human-readable terminal report.
//!
//! Layout follows the operator workflow: configuration echo, per-variant
//! summaries, overhead analysis, failures, then the per-prompt table.
//! Everything shown is taken from the run and its analysis; this module
//! never recomputes a statistic.

use std::collections::BTreeMap;
use std::fmt::Write;

use colored::Colorize;

use guardmark_core::{BenchmarkRun, Variant};
use guardmark_stats::RunAnalysis;

/// Width of section banners.
const BANNER_WIDTH: usize = 70;

/// Render the full terminal report.
pub fn render(run: &BenchmarkRun, analysis: &RunAnalysis) -> String {
    let mut out = String::new();
    config_section(&mut out, run);
    summary_section(&mut out, analysis);
    overhead_section(&mut out, analysis);
    pii_timing_section(&mut out, analysis);
    failures_section(&mut out, run, analysis);
    table_section(&mut out, analysis);
    out
}

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{rule}").unwrap();
    writeln!(out, "{}", title.bold()).unwrap();
    writeln!(out, "{rule}").unwrap();
}

fn config_section(out: &mut String, run: &BenchmarkRun) {
    let config = &run.config;
    banner(out, "GUARDRAIL LATENCY BENCHMARK");
    writeln!(out, "  {:<12}{}", "Run:", config.label).unwrap();
    writeln!(out, "  {:<12}{}", "Model:", config.model_id).unwrap();
    writeln!(out, "  {:<12}{}", "Region:", config.region).unwrap();
    writeln!(out, "  {:<12}{}", "Endpoint:", config.resolved_endpoint()).unwrap();
    if let Some(guardrail) = &config.guardrail {
        writeln!(
            out,
            "  {:<12}{} (version {})",
            "Guardrail:", guardrail.identifier, guardrail.version
        )
        .unwrap();
    }
    writeln!(
        out,
        "  {:<12}{} ({} prompts)",
        "Prompt set:",
        config.prompt_set,
        config.prompts.len()
    )
    .unwrap();
    writeln!(
        out,
        "  {:<12}{} per prompt and variant",
        "Iterations:", config.iterations
    )
    .unwrap();
    writeln!(out).unwrap();
}

fn summary_section(out: &mut String, analysis: &RunAnalysis) {
    banner(out, "RESULTS SUMMARY");
    if analysis.variants.is_empty() {
        writeln!(out, "  No results recorded.").unwrap();
        writeln!(out).unwrap();
        return;
    }
    for rollup in &analysis.variants {
        writeln!(out).unwrap();
        writeln!(out, "{}:", rollup.variant.display_name().to_uppercase()).unwrap();
        writeln!(out, "  {:<16}{}", "Requests:", rollup.total).unwrap();
        writeln!(out, "  {:<16}{}", "Successful:", rollup.successful).unwrap();
        writeln!(out, "  {:<16}{}", "Failed:", rollup.failed).unwrap();
        writeln!(out, "  {:<16}{}", "Blocked:", rollup.blocked).unwrap();
        match &rollup.latency {
            Some(latency) => {
                writeln!(out, "  {:<16}{:.1} ms", "Mean latency:", latency.mean).unwrap();
                writeln!(out, "  {:<16}{:.1} ms", "Median latency:", latency.median).unwrap();
                if let Some(std_dev) = latency.std_dev {
                    writeln!(out, "  {:<16}{:.1} ms", "Std deviation:", std_dev).unwrap();
                }
                writeln!(out, "  {:<16}{:.1} ms", "Min latency:", latency.min).unwrap();
                writeln!(out, "  {:<16}{:.1} ms", "Max latency:", latency.max).unwrap();
                writeln!(out, "  {:<16}{:.1} ms", "P95 latency:", latency.p95).unwrap();
            }
            None => {
                writeln!(out, "  No successful calls.").unwrap();
            }
        }
    }
    writeln!(out).unwrap();
}

fn overhead_section(out: &mut String, analysis: &RunAnalysis) {
    if analysis.comparisons.is_empty() {
        return;
    }
    banner(out, "OVERHEAD ANALYSIS");
    let mut baseline_written = false;
    for comparison in &analysis.comparisons {
        if comparison.baseline == Variant::Baseline {
            if !baseline_written {
                writeln!(
                    out,
                    "  Baseline mean ({}): {:.1} ms",
                    comparison.baseline.display_name(),
                    comparison.baseline_mean
                )
                .unwrap();
                baseline_written = true;
            }
            writeln!(
                out,
                "  {}: {:+.1} ms ({:+.1}%)",
                comparison.candidate.display_name(),
                comparison.delta_ms,
                comparison.delta_pct
            )
            .unwrap();
        } else {
            writeln!(
                out,
                "  {} vs {}: {:+.1} ms",
                comparison.candidate.display_name(),
                comparison.baseline.display_name(),
                comparison.delta_ms
            )
            .unwrap();
        }
    }
    if let Some(guardrail) = analysis
        .variants
        .iter()
        .find(|v| v.variant == Variant::Guardrail)
    {
        writeln!(
            out,
            "  Requests blocked: {}/{} ({:.1}%)",
            guardrail.blocked, guardrail.total, guardrail.blocked_rate
        )
        .unwrap();
    }
    writeln!(out).unwrap();
}

fn pii_timing_section(out: &mut String, analysis: &RunAnalysis) {
    let Some(mean) = analysis.variants.iter().find_map(|v| v.mean_pii_check_ms) else {
        return;
    };
    banner(out, "LOCAL PII CHECK TIMING");
    writeln!(out, "  Average PII check time: {mean:.3} ms").unwrap();
    writeln!(out).unwrap();
}

fn failures_section(out: &mut String, run: &BenchmarkRun, analysis: &RunAnalysis) {
    if analysis.variants.iter().all(|v| v.failed == 0) {
        return;
    }
    banner(out, "FAILURES");
    for rollup in &analysis.variants {
        if rollup.failed == 0 {
            continue;
        }
        let header = format!(
            "  {}: {} of {} calls failed",
            rollup.variant.display_name(),
            rollup.failed,
            rollup.total
        );
        writeln!(out, "{}", header.red()).unwrap();
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for result in run.results_for(rollup.variant) {
            if let Some(error) = &result.error {
                *counts.entry(error.as_str()).or_default() += 1;
            }
        }
        for (error, count) in counts {
            writeln!(out, "    {count}x {error}").unwrap();
        }
    }
    writeln!(out).unwrap();
}

fn table_section(out: &mut String, analysis: &RunAnalysis) {
    if analysis.prompts.is_empty() {
        return;
    }
    banner(out, "DETAILED RESULTS");

    let prompt_width = analysis
        .prompts
        .iter()
        .map(|row| row.prompt_label.chars().count())
        .max()
        .unwrap_or(0)
        .max("Prompt".len())
        + 2;
    let columns: Vec<(Variant, String)> = analysis
        .variants
        .iter()
        .map(|rollup| {
            (
                rollup.variant,
                format!("{} (ms)", rollup.variant.display_name()),
            )
        })
        .collect();

    let mut header = format!("{:<prompt_width$}", "Prompt");
    for (_, title) in &columns {
        let width = title.chars().count() + 2;
        write!(header, "{title:<width$}").unwrap();
    }
    header.push_str("Blocked");
    writeln!(out, "{header}").unwrap();
    writeln!(out, "{}", "-".repeat(header.chars().count())).unwrap();

    for row in &analysis.prompts {
        write!(out, "{:<prompt_width$}", row.prompt_label).unwrap();
        for (variant, title) in &columns {
            let width = title.chars().count() + 2;
            let cell = match row.mean_by_variant.get(variant) {
                Some(mean) => format!("{mean:.1}"),
                None => "-".to_string(),
            };
            write!(out, "{cell:<width$}").unwrap();
        }
        if row.ever_blocked {
            writeln!(out, "{}", "YES".red()).unwrap();
        } else {
            writeln!(out, "NO").unwrap();
        }
    }
}
