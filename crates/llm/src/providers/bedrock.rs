//! Amazon Bedrock generation provider.
//!
//! Calls the Bedrock runtime `InvokeModel` operation through the AWS SDK.
//! Credentials and region come from the shared SDK configuration.

use crate::client::{GenerationClient, GenerationRequest, ACCEPT, CONTENT_TYPE};
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use kotae_core::{AppError, AppResult};

/// Bedrock runtime client.
#[derive(Debug, Clone)]
pub struct BedrockClient {
    client: aws_sdk_bedrockruntime::Client,
}

impl BedrockClient {
    /// Wrap an existing SDK client.
    pub fn new(client: aws_sdk_bedrockruntime::Client) -> Self {
        Self { client }
    }

    /// Create a client from shared AWS configuration.
    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_bedrockruntime::Client::new(config))
    }
}

#[async_trait::async_trait]
impl GenerationClient for BedrockClient {
    fn provider_name(&self) -> &str {
        "bedrock"
    }

    async fn invoke(&self, request: &GenerationRequest) -> AppResult<Vec<u8>> {
        tracing::debug!("Sending InvokeModel request for {}", request.model_id);

        let body = request.body()?;

        let output = self
            .client
            .invoke_model()
            .model_id(&request.model_id)
            .accept(ACCEPT)
            .content_type(CONTENT_TYPE)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                AppError::Generation(format!(
                    "Bedrock InvokeModel failed for model {}: {}",
                    request.model_id,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(output.body().as_ref().to_vec())
    }
}
