//! Generation client factory.
//!
//! Builds the generation client once at startup from the resolved provider
//! settings. The returned handle is immutable and shared by every request.

use crate::client::GenerationClient;
use crate::providers::{BedrockClient, HttpGenerationClient};
use crate::types::ProviderType;
use kotae_core::{AppError, AppResult};
use std::sync::Arc;

/// Create a generation client for a provider.
///
/// # Arguments
/// * `provider` - Provider identifier ("bedrock", "http")
/// * `sdk_config` - Shared AWS configuration (used by "bedrock")
/// * `endpoint` - Base URL (required by "http")
/// * `api_key` - Optional bearer token (used by "http")
///
/// # Errors
/// Returns [`AppError::Config`] if the provider is unknown or its required
/// settings are missing.
pub fn create_generation_client(
    provider: &str,
    sdk_config: &aws_config::SdkConfig,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn GenerationClient>> {
    let provider_type = ProviderType::parse(provider)
        .ok_or_else(|| AppError::Config(format!("Unknown provider: {}", provider)))?;

    tracing::debug!("Creating {} generation client", provider_type.as_str());

    match provider_type {
        ProviderType::Bedrock => Ok(Arc::new(BedrockClient::from_sdk_config(sdk_config))),
        ProviderType::Http => {
            let endpoint = endpoint.ok_or_else(|| {
                AppError::Config("The http provider requires an endpoint".to_string())
            })?;
            Ok(Arc::new(HttpGenerationClient::new(
                endpoint,
                api_key.map(str::to_string),
            )))
        }
    }
}
