//! Search backend abstraction.
//!
//! The search backend owns ranking and language filtering. This module only
//! describes what kotae asks for and the part of each result it keeps.

use kotae_core::AppResult;
use serde::{Deserialize, Serialize};

/// One search request, built fresh for every question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalQuery {
    /// Natural-language question, passed through untouched
    pub question: String,

    /// Index (document collection) to search
    pub index_id: String,

    /// Content language the results are restricted to
    pub language_code: String,
}

/// A search result reduced to the fields kotae reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Backend document identifier, used for logging only
    pub document_id: Option<String>,

    /// Excerpt text, when the backend returned one
    pub excerpt: Option<String>,
}

impl SearchHit {
    pub fn with_excerpt(excerpt: impl Into<String>) -> Self {
        Self {
            document_id: None,
            excerpt: Some(excerpt.into()),
        }
    }
}

/// Trait for search backends.
///
/// One call issues exactly one query and returns every result in the order
/// the backend ranked them. Connectivity, auth, throttling and unknown-index
/// failures are reported as `AppError::Retrieval`.
#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    /// Get the provider name (e.g., "kendra").
    fn provider_name(&self) -> &str;

    /// Run a query.
    async fn query(&self, query: &RetrievalQuery) -> AppResult<Vec<SearchHit>>;
}
