//! RAG (Retrieval-Augmented Generation) request handling.

pub mod orchestrator;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::Stage;
