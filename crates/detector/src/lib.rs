// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Local regex PII detection and anonymization.
//!
//! This crate implements the application-level alternative to a backend
//! guardrail: a fixed, ordered table of regex matchers that scan prompt and
//! completion text for PII-shaped substrings and can redact them with
//! per-category placeholders.
//!
//! # Features
//!
//! - Fixed pattern table: email, phone, SSN-like, payment-card-like
//! - Measured detection time (the pass itself is a benchmarked quantity)
//! - Deterministic anonymization in category order
//!
//! # Example
//!
//! ```ignore
//! use guardmark_detector::PiiDetector;
//!
//! let detector = PiiDetector::new()?;
//! let detection = detector.detect("My email is a@b.com");
//! if detection.has_pii() {
//!     let safe = detector.anonymize("My email is a@b.com");
//!     assert_eq!(safe, "My email is [EMAIL]");
//! }
//! ```
//!
//! The patterns are deliberately simple and structural. They are known to
//! over-match in places (a dot-separated ten-digit run such as
//! `555.123.4567` reads as a phone number whether or not it is one); that
//! limitation is part of what the benchmark measures and is covered by
//! tests rather than patched over.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use regex::Regex;
use thiserror::Error;

use guardmark_core::PiiCategory;

/// Errors that can occur while constructing the detector.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// A pattern in the fixed table failed to compile.
    #[error("invalid {category} pattern: {source}")]
    Pattern {
        /// The category whose pattern failed.
        category: PiiCategory,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// Result type for detector operations.
pub type Result<T> = std::result::Result<T, DetectorError>;

/// The fixed pattern table, in detection and replacement order.
const PATTERN_TABLE: [(PiiCategory, &str); 4] = [
    (
        PiiCategory::Email,
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
    ),
    (
        PiiCategory::Phone,
        r"(\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
    ),
    (PiiCategory::Ssn, r"\b\d{3}[-.\s]?\d{2}[-.\s]?\d{4}\b"),
    (PiiCategory::CreditCard, r"\b(?:\d{4}[-.\s]?){3}\d{4}\b"),
];

/// The outcome of one detection pass.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Categories with at least one match anywhere in the text.
    pub categories: BTreeSet<PiiCategory>,
    /// Wall-clock time the pass took to evaluate every pattern.
    pub elapsed: Duration,
}

impl Detection {
    /// Whether any category matched.
    pub fn has_pii(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Elapsed time in fractional milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Regex-based PII detector with a fixed category table.
///
/// Patterns compile once at construction; a pattern that fails to compile
/// is a fatal setup error, not a per-call one. Detection evaluates every
/// pattern against the full text and reports its own wall-clock cost, since
/// that cost is exactly what the local-filter variant exists to measure.
pub struct PiiDetector {
    patterns: Vec<(PiiCategory, Regex)>,
}

impl PiiDetector {
    /// Compile the pattern table.
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::with_capacity(PATTERN_TABLE.len());
        for (category, source) in PATTERN_TABLE {
            let regex = Regex::new(source)
                .map_err(|source| DetectorError::Pattern { category, source })?;
            patterns.push((category, regex));
        }
        Ok(Self { patterns })
    }

    /// Scan `text` for every category, timing the pass.
    pub fn detect(&self, text: &str) -> Detection {
        let start = Instant::now();
        let mut categories = BTreeSet::new();
        for (category, regex) in &self.patterns {
            if regex.is_match(text) {
                categories.insert(*category);
            }
        }
        Detection {
            categories,
            elapsed: start.elapsed(),
        }
    }

    /// Replace every match of every category with its placeholder.
    ///
    /// Replacement runs in fixed category order (email, phone, ssn, card);
    /// placeholders contain no digits or `@`, so later patterns never
    /// re-match text already replaced.
    pub fn anonymize(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (category, regex) in &self.patterns {
            result = regex.replace_all(&result, category.placeholder()).into_owned();
        }
        result
    }
}
