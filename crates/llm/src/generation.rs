//! Generation invoker: prompt in, completion text out.

use crate::client::{GenerationClient, GenerationRequest, GenerationResponse};
use kotae_core::{AppError, AppResult};
use kotae_prompt::Prompt;

/// Generate a completion for a prompt.
///
/// This function:
/// 1. Builds a request with the fixed token budget and JSON content type
/// 2. Invokes the backend once and waits for the full response
/// 3. Parses the body and logs the whole envelope
/// 4. Returns the `completion` field, or `None` if the backend omitted it
///
/// Backend failures surface as [`AppError::Generation`] and unreadable bodies
/// as [`AppError::MalformedResponse`]. Nothing is retried.
pub async fn generate(
    client: &dyn GenerationClient,
    prompt: Prompt,
    model_id: &str,
) -> AppResult<Option<String>> {
    if model_id.trim().is_empty() {
        return Err(AppError::Config(
            "Generation model id must not be empty".to_string(),
        ));
    }

    let request = GenerationRequest::new(prompt, model_id);

    tracing::info!(
        "Invoking model {} via {}",
        request.model_id,
        client.provider_name()
    );
    tracing::debug!("Prompt: {}", request.prompt);

    let body = client.invoke(&request).await?;
    let response = GenerationResponse::from_body(&body)?;

    tracing::info!("Received response_body: {}", response.envelope);

    if response.completion.is_none() {
        tracing::warn!("Response from model {} has no completion", request.model_id);
    }

    Ok(response.completion)
}
