//! Prompt construction for kotae.
//!
//! This crate provides:
//! - `EvidenceList`: the bounded, normalized excerpts a prompt is grounded on
//! - `Prompt`: the composed prompt string
//! - `build_prompt`: the fixed prompt template

pub mod builder;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use types::{normalize_excerpt, EvidenceList, Prompt, MAX_EVIDENCE};
