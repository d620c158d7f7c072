//! Generation backends for kotae.
//!
//! This crate wraps the hosted LLM behind a small trait and turns its JSON
//! envelope into a plain completion string.
//!
//! # Providers
//! - **bedrock**: Amazon Bedrock `InvokeModel` via the AWS SDK (default)
//! - **http**: Bedrock-compatible REST endpoint with bearer-token auth
//!
//! # Example
//! ```no_run
//! use kotae_llm::{generate, providers::HttpGenerationClient};
//! use kotae_prompt::Prompt;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpGenerationClient::new("http://localhost:8080", None);
//! let prompt = Prompt::new("\n\nHuman: Hello\n\nAssistant:");
//! let completion = generate(&client, prompt, "anthropic.claude-v2").await?;
//! println!("{:?}", completion);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod generation;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{
    GenerationClient, GenerationRequest, GenerationResponse, ACCEPT, CONTENT_TYPE,
    MAX_TOKENS_TO_SAMPLE,
};
pub use factory::create_generation_client;
pub use generation::generate;
pub use providers::{BedrockClient, HttpGenerationClient};
pub use types::ProviderType;
