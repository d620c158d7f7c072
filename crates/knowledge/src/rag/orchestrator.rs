//! RAG request orchestration.
//!
//! Retrieves evidence for a question, builds the prompt and asks the
//! generation backend for the answer.

use crate::rag::types::Stage;
use crate::retriever::Retriever;
use crate::search::SearchClient;
use kotae_core::{AppResult, RagSettings};
use kotae_llm::{generate, GenerationClient};
use kotae_prompt::build_prompt;
use std::sync::Arc;
use tracing::{Instrument, Span};

/// Handles one question at a time against a search and a generation backend.
///
/// Both backend handles are created once per process and shared read-only by
/// every request.
#[derive(Clone)]
pub struct Orchestrator {
    retriever: Retriever,
    generation: Arc<dyn GenerationClient>,
    settings: RagSettings,
}

impl Orchestrator {
    /// Create an orchestrator from backend handles and settings.
    pub fn new(
        search: Arc<dyn SearchClient>,
        generation: Arc<dyn GenerationClient>,
        settings: RagSettings,
    ) -> Self {
        Self {
            retriever: Retriever::new(search, settings.language_code.clone()),
            generation,
            settings,
        }
    }

    /// Answer a question.
    ///
    /// This function:
    /// 1. Checks that an index id and a model id are configured
    /// 2. Retrieves up to five excerpts from the search backend
    /// 3. Builds the prompt from the question and the excerpts
    /// 4. Invokes the model and extracts the completion
    ///
    /// Returns `Ok(None)` when the model response carries no completion. Any
    /// failure aborts the request: configuration problems surface before a
    /// backend is contacted, and a failed search means the model is never
    /// invoked.
    pub async fn handle(&self, question: &str) -> AppResult<Option<String>> {
        let (_, result) = self.process(question).await;
        result
    }

    /// Run one request inside a `rag` span and report the stage it ended in.
    pub(crate) async fn process(&self, question: &str) -> (Stage, AppResult<Option<String>>) {
        let span = tracing::info_span!("rag", stage = Stage::Start.as_str());
        let mut stage = Stage::Start;

        let result = self
            .run(question, &mut stage, &span)
            .instrument(span.clone())
            .await;

        if let Err(ref e) = result {
            span.in_scope(|| {
                tracing::error!("Request failed at stage {}: {}", stage, e);
                advance(&span, &mut stage, Stage::Failed);
            });
        }

        (stage, result)
    }

    async fn run(
        &self,
        question: &str,
        stage: &mut Stage,
        span: &Span,
    ) -> AppResult<Option<String>> {
        let (index_id, model_id) = self.settings.require()?;

        advance(span, stage, Stage::Retrieving);
        let evidence = self.retriever.retrieve(question, index_id).await?;

        advance(span, stage, Stage::PromptBuilt);
        let prompt = build_prompt(question, &evidence);

        advance(span, stage, Stage::Generating);
        let completion = generate(self.generation.as_ref(), prompt, model_id).await?;

        advance(span, stage, Stage::Done);
        Ok(completion)
    }
}

fn advance(span: &Span, stage: &mut Stage, next: Stage) {
    tracing::debug!("Stage {} -> {}", stage, next);
    span.record("stage", next.as_str());
    *stage = next;
}
