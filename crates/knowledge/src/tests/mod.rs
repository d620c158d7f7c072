//! Shared test doubles and end-to-end request scenarios.

mod rag_scenarios;
