// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for core operations.

use thiserror::Error;

/// Errors raised by core validation and prompt loading.
///
/// These only occur during run set-up; once a run is underway the runner
/// records per-call failures on the results themselves rather than raising.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Run configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A prompt file could not be read.
    #[error("failed to read prompt file {path}: {source}")]
    PromptFile {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A prompt file was read but contained no usable prompts.
    #[error("prompt file {0} contains no prompts")]
    EmptyPromptFile(String),
}

impl CoreError {
    /// Convenience constructor for configuration errors.
    pub fn config(message: impl Into<String>) -> Self {
        CoreError::Config(message.into())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CoreError::config("iterations must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: iterations must be at least 1"
        );
    }
}
