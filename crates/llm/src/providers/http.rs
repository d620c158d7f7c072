//! Bedrock-compatible HTTP generation provider.
//!
//! Posts the invocation body to `{endpoint}/model/{model_id}/invoke`, the
//! REST shape of Bedrock's `InvokeModel`. Authenticates with a bearer token
//! (Bedrock API keys) when one is configured, which also makes it usable
//! against local Bedrock-compatible stubs.

use crate::client::{GenerationClient, GenerationRequest, ACCEPT, CONTENT_TYPE};
use kotae_core::{AppError, AppResult};
use reqwest::header;

/// HTTP generation client.
pub struct HttpGenerationClient {
    /// Base URL of the runtime endpoint
    base_url: String,

    /// Optional bearer token
    api_key: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpGenerationClient {
    /// Create a client for a base URL, e.g.
    /// `https://bedrock-runtime.ap-northeast-1.amazonaws.com`.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Build the invoke URL for a model, percent-encoding the model id.
    fn invoke_url(&self, model_id: &str) -> AppResult<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            AppError::Config(format!("Invalid endpoint '{}': {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                AppError::Config(format!(
                    "Endpoint '{}' cannot be used as a base URL",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["model", model_id, "invoke"]);

        Ok(url)
    }
}

#[async_trait::async_trait]
impl GenerationClient for HttpGenerationClient {
    fn provider_name(&self) -> &str {
        "http"
    }

    async fn invoke(&self, request: &GenerationRequest) -> AppResult<Vec<u8>> {
        let url = self.invoke_url(&request.model_id)?;
        tracing::debug!("POST {}", url);

        let mut builder = self
            .client
            .post(url.clone())
            .header(header::ACCEPT, ACCEPT)
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .body(request.body()?);

        if let Some(ref api_key) = self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|e| {
            AppError::Generation(format!("Failed to send request to {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Generation(format!(
                "Model invocation failed ({}): {}",
                status, error_text
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            AppError::Generation(format!("Failed to read response body: {}", e))
        })?;

        Ok(bytes.to_vec())
    }
}
