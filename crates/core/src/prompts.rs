// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Built-in prompt sets and prompt-file loading.
//!
//! The built-in sets are fixed so runs stay comparable across invocations
//! and machines. The general set mixes knowledge questions with a few
//! prompts that happen to contain PII-like content; the PII set ramps from
//! clean prompts through single and multiple PII occurrences to a known
//! detector edge case.

use std::path::Path;

use crate::error::{CoreError, Result};

/// Prompt used for unrecorded warm-up calls.
pub const WARMUP_PROMPT: &str = "Hello";

/// General-purpose prompt set for guardrail overhead runs.
pub const GENERAL_PROMPTS: [&str; 10] = [
    "What is the capital of France?",
    "Explain how photosynthesis works in simple terms.",
    "Write a short poem about the ocean.",
    "What are the benefits of regular exercise?",
    "Describe the water cycle.",
    "My email is test@example.com, can you help me write a professional signature?",
    "The server IP 192.168.1.100 is not responding, what should I check?",
    "What are some conflict resolution strategies?",
    "How do I handle criticism at work?",
    "Explain the history of martial arts.",
];

/// PII-focused prompt set for filter comparison runs.
///
/// The last prompt is a deliberate edge case: the phone pattern matches
/// IP-address-like digit runs, and that behavior is kept visible rather
/// than special-cased away.
pub const PII_PROMPTS: [&str; 10] = [
    "What is the capital of France?",
    "Explain quantum computing in simple terms.",
    "What are best practices for code review?",
    "My email is john.doe@example.com, can you help me write a professional bio?",
    "Contact support at help@company.org for assistance.",
    "Call me at 555-123-4567 to discuss the project.",
    "My office number is (800) 555-0199.",
    "Send the report to alice@corp.com or call 555-987-6543.",
    "Reach out to bob@test.io at +1-555-000-1111 for details.",
    "The IP address 192.168.1.1 is not a phone number.",
];

/// Load prompts from a file, one per line.
///
/// Blank lines and lines starting with `#` are skipped. An unreadable file
/// or a file with no usable prompts is a fatal setup error.
pub fn load_prompt_file(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|source| CoreError::PromptFile {
        path: path.display().to_string(),
        source,
    })?;
    let prompts: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    if prompts.is_empty() {
        return Err(CoreError::EmptyPromptFile(path.display().to_string()));
    }
    Ok(prompts)
}
