//! Generation backend abstraction and request/response envelopes.
//!
//! This module defines the contract every generation backend implements and
//! the boundary types that turn its loosely-shaped JSON into a plain
//! completion string.

use kotae_core::{AppError, AppResult};
use kotae_prompt::Prompt;
use serde::{Deserialize, Serialize};

/// Output token budget for every completion.
pub const MAX_TOKENS_TO_SAMPLE: u32 = 600;

/// `Accept` header sent with every invocation.
pub const ACCEPT: &str = "application/json";

/// `Content-Type` of every request body.
pub const CONTENT_TYPE: &str = "application/json";

/// A single generation invocation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The prompt text to complete
    pub prompt: Prompt,

    /// Model identifier (e.g., "anthropic.claude-v2")
    pub model_id: String,

    /// Maximum tokens to generate
    pub max_tokens_to_sample: u32,
}

/// Wire body of an invocation.
#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    prompt: &'a str,
    max_tokens_to_sample: u32,
}

impl GenerationRequest {
    /// Create a request with the fixed token budget.
    pub fn new(prompt: Prompt, model_id: impl Into<String>) -> Self {
        Self {
            prompt,
            model_id: model_id.into(),
            max_tokens_to_sample: MAX_TOKENS_TO_SAMPLE,
        }
    }

    /// Serialize the JSON body: `{"prompt": ..., "max_tokens_to_sample": ...}`.
    pub fn body(&self) -> AppResult<Vec<u8>> {
        let body = RequestBody {
            prompt: self.prompt.as_str(),
            max_tokens_to_sample: self.max_tokens_to_sample,
        };
        Ok(serde_json::to_vec(&body)?)
    }
}

/// Parsed generation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The full response object as returned by the backend
    pub envelope: serde_json::Value,

    /// Generated text, if the backend produced any
    pub completion: Option<String>,
}

impl GenerationResponse {
    /// Parse a raw response body.
    ///
    /// A body that is not a JSON object fails with
    /// [`AppError::MalformedResponse`]. A missing or `null` `completion` is not
    /// an error and yields `completion: None`; a `completion` of any other
    /// non-string type is malformed.
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        let envelope: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
            AppError::MalformedResponse(format!("Response body is not valid JSON: {}", e))
        })?;

        let object = envelope.as_object().ok_or_else(|| {
            AppError::MalformedResponse(format!(
                "Expected a JSON object, got: {}",
                truncate(&envelope.to_string(), 200)
            ))
        })?;

        let completion = match object.get("completion") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(text)) => Some(text.clone()),
            Some(other) => {
                return Err(AppError::MalformedResponse(format!(
                    "Field 'completion' is not a string: {}",
                    truncate(&other.to_string(), 200)
                )))
            }
        };

        Ok(Self {
            envelope,
            completion,
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

/// Trait for generation backends.
///
/// Implementations perform exactly one blocking (non-streamed) invocation per
/// call and hand back the raw response body. Transport, auth, throttling and
/// unknown-model failures are reported as [`AppError::Generation`]. Nothing is
/// retried here.
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    /// Get the provider name (e.g., "bedrock", "http").
    fn provider_name(&self) -> &str;

    /// Invoke the model and return the full response body.
    async fn invoke(&self, request: &GenerationRequest) -> AppResult<Vec<u8>>;
}
