//! Ask command handler.
//!
//! Builds both backend clients, then answers one question through the RAG
//! orchestrator.

use clap::Args;
use kotae_core::{config::AppConfig, AppError, AppResult};
use kotae_knowledge::{KendraSearchClient, Orchestrator};
use kotae_llm::create_generation_client;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Answer a question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Option<String>,

    /// Read the question from an invocation event file (`{"user_prompt": "..."}`)
    #[arg(long, conflicts_with = "question")]
    pub event: Option<PathBuf>,

    /// Output as JSON (`{"completion": ...}`)
    #[arg(long)]
    pub json: bool,
}

/// Invocation event carrying the user's question.
#[derive(Debug, Deserialize)]
struct InvocationEvent {
    #[serde(default)]
    user_prompt: Option<String>,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        // Fail fast before any client is built
        config.validate()?;

        let question = self.get_question()?;
        tracing::debug!("Question: {}", question);

        let sdk_config = load_sdk_config(config.region.as_deref()).await;

        let search = Arc::new(KendraSearchClient::from_sdk_config(&sdk_config));
        let generation = create_generation_client(
            &config.provider,
            &sdk_config,
            config.endpoint.as_deref(),
            config.api_key.as_deref(),
        )?;

        let orchestrator = Orchestrator::new(search, generation, config.rag_settings());
        let completion = orchestrator.handle(&question).await?;

        if let Some(output) = self.render(completion.as_deref())? {
            println!("{}", output);
        }

        Ok(())
    }

    /// Get the question from the positional argument or the event file.
    fn get_question(&self) -> AppResult<String> {
        if let Some(ref question) = self.question {
            return Ok(question.clone());
        }

        match self.event {
            Some(ref path) => read_event(path),
            None => Err(AppError::Config(
                "No question provided (pass QUESTION or --event)".to_string(),
            )),
        }
    }

    /// Format the completion for stdout; nothing is printed for an absent
    /// completion unless JSON output is requested.
    fn render(&self, completion: Option<&str>) -> AppResult<Option<String>> {
        if self.json {
            let output = serde_json::json!({ "completion": completion });
            return Ok(Some(serde_json::to_string_pretty(&output)?));
        }

        if completion.is_none() {
            tracing::warn!("The model returned no completion");
        }

        Ok(completion.map(str::to_string))
    }
}

/// Read the question from an invocation event file.
///
/// An event without `user_prompt` yields an empty question.
fn read_event(path: &Path) -> AppResult<String> {
    let contents = std::fs::read_to_string(path)?;
    let event: InvocationEvent = serde_json::from_str(&contents)?;

    if event.user_prompt.is_none() {
        tracing::warn!("Event {:?} has no user_prompt", path);
    }

    Ok(event.user_prompt.unwrap_or_default())
}

/// Load shared AWS configuration once for both backends.
async fn load_sdk_config(region: Option<&str>) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = region {
        loader = loader.region(aws_config::Region::new(region.to_string()));
    }

    loader.load().await
}
