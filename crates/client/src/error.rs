// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for model invocation.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while building the client or making a call.
///
/// During a benchmark run these never propagate past the call boundary;
/// the invoker captures them as the `error` text of the call's result. The
/// `Display` form is therefore the exact text later inspected by the
/// guardrail reclassification heuristic.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The prompt was empty or whitespace-only.
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Init(#[source] reqwest::Error),

    /// The request could not be sent or the response body not received.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: StatusCode,
        /// The response body, verbatim.
        body: String,
    },

    /// The response body was not JSON of the expected shape.
    #[error("malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
