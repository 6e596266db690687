// Copyright 2025 Guardmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! The reqwest transport and the measured timing window.

use std::time::Instant;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use guardmark_core::{GuardrailConfig, RunConfig};

use crate::error::{ClientError, Result};
use crate::request::{InferenceConfig, InvokeRequest};
use crate::response::InvokeResponse;

/// Header carrying the guardrail identifier.
pub const HEADER_GUARDRAIL_ID: &str = "X-Amzn-Bedrock-GuardrailIdentifier";

/// Header carrying the guardrail version.
pub const HEADER_GUARDRAIL_VERSION: &str = "X-Amzn-Bedrock-GuardrailVersion";

/// One completed round trip: the measured window plus its outcome.
#[derive(Debug)]
pub struct TimedResponse {
    /// Wall-clock milliseconds from just before dispatch until the
    /// response body was received and parsed, or until the failure was
    /// observed.
    pub latency_ms: f64,
    /// The parsed response, or the captured failure.
    pub outcome: Result<InvokeResponse>,
}

/// HTTP client for the model invocation endpoint.
///
/// The client imposes no timeout of its own: a hung call simply extends
/// that call's measured latency until the transport gives up, which is
/// then recorded like any other failure.
pub struct ModelClient {
    http: reqwest::Client,
    invoke_url: String,
    bearer_token: Option<String>,
    inference: InferenceConfig,
}

impl ModelClient {
    /// Build a client for the run's endpoint and model.
    pub fn new(config: &RunConfig, bearer_token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Init)?;
        Ok(Self {
            http,
            invoke_url: format!(
                "{}/model/{}/invoke",
                config.resolved_endpoint(),
                config.model_id
            ),
            bearer_token,
            inference: InferenceConfig::from(config),
        })
    }

    /// Issue one invocation, timing the full round trip.
    ///
    /// The window opens immediately before the request is dispatched and
    /// closes after the response body has been received and parsed (or the
    /// failure observed), so the measured latency is what a real caller
    /// would experience, local parsing cost included. Payload construction
    /// happens before the window opens.
    pub async fn invoke(
        &self,
        prompt: &str,
        guardrail: Option<&GuardrailConfig>,
    ) -> TimedResponse {
        let request = match InvokeRequest::for_prompt(prompt, self.inference) {
            Ok(request) => request,
            Err(err) => {
                return TimedResponse {
                    latency_ms: 0.0,
                    outcome: Err(err),
                }
            }
        };

        let mut builder = self
            .http
            .post(&self.invoke_url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(guardrail) = guardrail {
            builder = builder
                .header(HEADER_GUARDRAIL_ID, guardrail.identifier.as_str())
                .header(HEADER_GUARDRAIL_VERSION, guardrail.version.as_str());
        }
        let builder = builder.json(&request);

        debug!(
            url = %self.invoke_url,
            guardrail = guardrail.is_some(),
            "invoking model"
        );

        let start = Instant::now();
        let outcome = round_trip(builder).await;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        TimedResponse {
            latency_ms,
            outcome,
        }
    }
}

async fn round_trip(builder: reqwest::RequestBuilder) -> Result<InvokeResponse> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(ClientError::Status {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    Ok(serde_json::from_slice(&body)?)
}
