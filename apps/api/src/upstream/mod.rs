//! Upstream model client — the single point of entry for remote AI calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to the model backend
//! directly; all delegation goes through this client. Calls are made exactly
//! once — transport retry belongs to the surrounding infrastructure, and the
//! core guarantees no partial turn state when a call fails.

use anyhow::Result;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ModelRequest<'a> {
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ModelMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ModelMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ModelResponse {
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

impl ModelResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

/// HTTP client for the configured model backend.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            api_key,
        }
    }

    /// Makes a single call to the model backend. No internal retry.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<ModelResponse, UpstreamError> {
        let request_body = ModelRequest {
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![ModelMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let model_response: ModelResponse = response.json().await?;
        debug!("upstream call succeeded");
        Ok(model_response)
    }

    /// Calls the backend and deserializes the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, UpstreamError> {
        let response = self.call(prompt, system).await?;
        let text = response.text().ok_or(UpstreamError::EmptyContent)?;
        let text = strip_json_fences(text);
        serde_json::from_str(text).map_err(UpstreamError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
