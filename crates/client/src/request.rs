// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! The typed invocation payload.
//!
//! Field names follow the backend's camelCase wire contract so a payload
//! can never drift from it via a misspelled dictionary key.

use serde::{Deserialize, Serialize};

use guardmark_core::RunConfig;

use crate::error::{ClientError, Result};

/// Generation-control parameters attached to every invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling threshold; omitted from the payload when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

impl From<&RunConfig> for InferenceConfig {
    fn from(config: &RunConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }
}

/// A message author on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The caller.
    User,
    /// The model.
    Assistant,
}

/// One text block inside a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// The block's text.
    pub text: String,
}

/// One conversation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who authored the message.
    pub role: Role,
    /// The message's content blocks.
    pub content: Vec<ContentBlock>,
}

/// The full invocation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    /// The conversation, a single user message for benchmark calls.
    pub messages: Vec<Message>,
    /// Generation-control parameters.
    pub inference_config: InferenceConfig,
}

impl InvokeRequest {
    /// Build the payload for one prompt.
    ///
    /// The only validation at this boundary is that the prompt is
    /// non-empty; everything else about the prompt is the backend's
    /// business.
    pub fn for_prompt(prompt: &str, inference: InferenceConfig) -> Result<Self> {
        if prompt.trim().is_empty() {
            return Err(ClientError::EmptyPrompt);
        }
        Ok(Self {
            messages: vec![Message {
                role: Role::User,
                content: vec![ContentBlock {
                    text: prompt.to_string(),
                }],
            }],
            inference_config: inference,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_payload_matches_wire_contract() {
        let request = InvokeRequest::for_prompt(
            "What is the capital of France?",
            InferenceConfig {
                max_tokens: 512,
                temperature: 0.7,
                top_p: Some(0.9),
            },
        )
        .unwrap();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "messages": [
                    {"role": "user", "content": [{"text": "What is the capital of France?"}]}
                ],
                "inferenceConfig": {"maxTokens": 512, "temperature": 0.7, "topP": 0.9}
            })
        );
    }

    #[test]
    fn test_top_p_omitted_when_absent() {
        let request = InvokeRequest::for_prompt(
            "hello",
            InferenceConfig {
                max_tokens: 256,
                temperature: 0.7,
                top_p: None,
            },
        )
        .unwrap();

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("topP"));
        assert!(json.contains("\"maxTokens\":256"));
    }

    #[test]
    fn test_empty_prompt_rejected() {
        let inference = InferenceConfig {
            max_tokens: 64,
            temperature: 0.0,
            top_p: None,
        };
        assert!(matches!(
            InvokeRequest::for_prompt("", inference),
            Err(ClientError::EmptyPrompt)
        ));
        assert!(matches!(
            InvokeRequest::for_prompt("   \n", inference),
            Err(ClientError::EmptyPrompt)
        ));
    }
}
