//! Terminal progress bar for the benchmark loop.

use indicatif::{ProgressBar, ProgressStyle};

use guardmark_bench::ProgressSink;
use guardmark_core::{InvocationResult, Variant};

/// Streams per-call progress to an indicatif bar.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// Create a bar sized to the full call plan.
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }
}

impl ProgressSink for BarProgress {
    fn warmup(&self, variant: Variant) {
        self.bar.set_message(format!("warming up {variant}"));
    }

    fn call_finished(&self, completed: usize, _total: usize, result: &InvocationResult) {
        self.bar.set_position(completed as u64);
        self.bar.set_message(describe(result));
    }

    fn finished(&self) {
        self.bar.finish_and_clear();
    }
}

/// One-line outcome for the bar's message slot.
fn describe(result: &InvocationResult) -> String {
    if let Some(error) = &result.error {
        return format!("{} error: {error}", result.variant);
    }
    if result.blocked {
        return format!("{} BLOCKED", result.variant);
    }
    if result.pii_found.is_empty() {
        format!("{} {:.1} ms", result.variant, result.total_ms)
    } else {
        let categories: Vec<&str> = result.pii_found.iter().map(|c| c.as_str()).collect();
        format!(
            "{} {:.1} ms pii: {}",
            result.variant,
            result.total_ms,
            categories.join("+")
        )
    }
}
