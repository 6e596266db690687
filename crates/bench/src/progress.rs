//! Observer hooks for long-running executions.

use guardmark_core::{InvocationResult, Variant};

/// Receives runner lifecycle notifications.
///
/// The runner itself never prints; anything user-facing, like a progress
/// bar, hangs off this trait. Every method defaults to a no-op so a sink
/// can observe only what it cares about.
pub trait ProgressSink: Send + Sync {
    /// A warm-up call is about to be issued for `variant`.
    fn warmup(&self, variant: Variant) {
        let _ = variant;
    }

    /// A timed call finished and is about to be recorded. `completed`
    /// counts this call; `total` is the full plan size.
    fn call_finished(&self, completed: usize, total: usize, result: &InvocationResult) {
        let _ = (completed, total, result);
    }

    /// The run completed; tear down any UI the sink owns.
    fn finished(&self) {}
}

/// A sink that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {}
