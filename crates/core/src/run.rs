// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! A completed (or in-progress) benchmark run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::RunConfig;
use crate::result::InvocationResult;
use crate::variant::Variant;

/// All results of one benchmark run, grouped by variant.
///
/// Created empty when the run starts; the runner appends one record per
/// timed call. Within each variant, append order is plan order and is
/// preserved through export and re-import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    /// Unique identifier of this run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished. Equal to `started_at` until
    /// [`finish`](Self::finish) is called.
    pub finished_at: DateTime<Utc>,
    /// The configuration the run executed.
    pub config: RunConfig,
    /// Recorded results per variant, in append order.
    pub results: BTreeMap<Variant, Vec<InvocationResult>>,
}

impl BenchmarkRun {
    /// Start an empty run for the given configuration.
    pub fn new(config: RunConfig) -> Self {
        let now = Utc::now();
        Self {
            run_id: Uuid::new_v4(),
            started_at: now,
            finished_at: now,
            config,
            results: BTreeMap::new(),
        }
    }

    /// Append one call result under its variant.
    pub fn record(&mut self, result: InvocationResult) {
        self.results.entry(result.variant).or_default().push(result);
    }

    /// Stamp the completion time.
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    /// Results recorded for one variant, empty when the variant never ran.
    pub fn results_for(&self, variant: Variant) -> &[InvocationResult] {
        self.results.get(&variant).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of recorded results across all variants.
    pub fn total_recorded(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }
}
