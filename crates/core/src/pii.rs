// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Categories of personally identifiable information recognized by the
//! local filter.

use serde::{Deserialize, Serialize};

/// A category of PII the local regex filter can detect and anonymize.
///
/// The declaration order is the order in which anonymization replacements
/// are applied, and the order categories are listed in reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    /// Email addresses.
    Email,
    /// North American phone numbers, with or without a country prefix.
    Phone,
    /// US social security numbers.
    Ssn,
    /// Credit card numbers in four groups of four digits.
    CreditCard,
}

impl PiiCategory {
    /// All categories in replacement order.
    pub const ALL: [PiiCategory; 4] = [
        PiiCategory::Email,
        PiiCategory::Phone,
        PiiCategory::Ssn,
        PiiCategory::CreditCard,
    ];

    /// Stable snake_case key, as used in the JSON export.
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiCategory::Email => "email",
            PiiCategory::Phone => "phone",
            PiiCategory::Ssn => "ssn",
            PiiCategory::CreditCard => "credit_card",
        }
    }

    /// The placeholder substituted for matches of this category.
    pub fn placeholder(&self) -> &'static str {
        match self {
            PiiCategory::Email => "[EMAIL]",
            PiiCategory::Phone => "[PHONE]",
            PiiCategory::Ssn => "[SSN]",
            PiiCategory::CreditCard => "[CARD]",
        }
    }
}

impl std::fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
