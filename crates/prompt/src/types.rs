//! Prompt types for kotae.
//!
//! This module defines the evidence list fed into a prompt and the composed
//! prompt itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of excerpts kept as evidence for one question.
pub const MAX_EVIDENCE: usize = 5;

/// Ordered excerpts grounding an answer, most relevant first.
///
/// Holds at most [`MAX_EVIDENCE`] entries. An empty list is valid and simply
/// means the search returned nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceList(Vec<String>);

impl EvidenceList {
    /// Build an evidence list from search excerpts in relevance order.
    ///
    /// Only the first [`MAX_EVIDENCE`] excerpts are kept. A missing excerpt
    /// becomes an empty string, and every excerpt is passed through
    /// [`normalize_excerpt`].
    pub fn from_excerpts<I>(excerpts: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let items = excerpts
            .into_iter()
            .take(MAX_EVIDENCE)
            .map(|excerpt| normalize_excerpt(excerpt.as_deref().unwrap_or_default()))
            .collect();

        Self(items)
    }

    /// Number of excerpts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the search produced no excerpts.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Render the excerpts as a JSON array.
    ///
    /// Non-ASCII text is emitted as-is rather than `\u` escaped.
    pub fn to_json(&self) -> String {
        // A list of strings always serializes
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

impl<'a> IntoIterator for &'a EvidenceList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collapse escaped line breaks in a search excerpt.
///
/// Replaces each literal two-character `\n` sequence (backslash, `n`) with a
/// single space. Actual newline characters are left in place: only excerpts
/// whose line breaks arrive already escaped are flattened.
pub fn normalize_excerpt(text: &str) -> String {
    text.replace("\\n", " ")
}

/// The single prompt string sent to the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
