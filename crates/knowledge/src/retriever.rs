//! Retriever: turns a question into bounded, normalized evidence.

use crate::search::{RetrievalQuery, SearchClient};
use kotae_core::AppResult;
use kotae_prompt::EvidenceList;
use std::sync::Arc;

/// Queries the search backend and shapes the results into evidence.
#[derive(Clone)]
pub struct Retriever {
    client: Arc<dyn SearchClient>,
    language_code: String,
}

impl Retriever {
    /// Create a retriever filtering every query on `language_code`.
    pub fn new(client: Arc<dyn SearchClient>, language_code: impl Into<String>) -> Self {
        Self {
            client,
            language_code: language_code.into(),
        }
    }

    /// Retrieve evidence for a question from one index.
    ///
    /// Issues a single query and keeps the first five results in backend
    /// order. A result without an excerpt contributes an empty string, and
    /// zero results yield an empty list. Backend failures propagate as
    /// `AppError::Retrieval` without partial results.
    pub async fn retrieve(&self, question: &str, index_id: &str) -> AppResult<EvidenceList> {
        let query = RetrievalQuery {
            question: question.to_string(),
            index_id: index_id.to_string(),
            language_code: self.language_code.clone(),
        };

        tracing::info!(
            "Searching index {} via {}",
            index_id,
            self.client.provider_name()
        );

        let hits = self.client.query(&query).await?;

        tracing::debug!(
            "Search returned {} results: {:?}",
            hits.len(),
            hits.iter()
                .map(|hit| hit.document_id.as_deref().unwrap_or("-"))
                .collect::<Vec<_>>()
        );

        let evidence = EvidenceList::from_excerpts(hits.into_iter().map(|hit| hit.excerpt));

        tracing::info!("Received results: {}", evidence.to_json());

        Ok(evidence)
    }
}
