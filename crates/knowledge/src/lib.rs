//! Retrieval and RAG orchestration for kotae.
//!
//! Provides the search backend abstraction (with an Amazon Kendra provider),
//! the retriever that shapes search results into evidence, and the
//! orchestrator that answers a question end to end.

pub mod providers;
pub mod rag;
pub mod retriever;
pub mod search;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use providers::KendraSearchClient;
pub use rag::{Orchestrator, Stage};
pub use retriever::Retriever;
pub use search::{RetrievalQuery, SearchClient, SearchHit};
