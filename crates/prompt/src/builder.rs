//! Prompt builder: composes the question and its evidence into one prompt.

use crate::types::{EvidenceList, Prompt};

/// Opening role marker.
const HUMAN_TAG: &str = "\n\nHuman:";

/// Closing role marker; the model's answer starts right after it.
const ASSISTANT_TAG: &str = "\n\nAssistant:";

/// Instruction to answer the question from the reference material only.
const INSTRUCTION: &str = "[参考]情報をもとに[質問]に適切に答えてください。";

const QUESTION_HEADER: &str = "[質問]";

const REFERENCE_HEADER: &str = "[参考]";

/// Build the prompt for a question and its evidence.
///
/// The layout is fixed:
/// 1. the `Human:` role marker
/// 2. the instruction and the question, copied verbatim
/// 3. the evidence, rendered as a JSON array of strings
/// 4. the `Assistant:` role marker
///
/// The question is not sanitized. The same inputs always produce the same
/// bytes.
///
/// # Example
/// ```
/// use kotae_prompt::{build_prompt, EvidenceList};
///
/// let excerpt = Some("Tokyo is the capital of Japan.".to_string());
/// let evidence = EvidenceList::from_excerpts(vec![excerpt]);
/// let prompt = build_prompt("What is the capital of Japan?", &evidence);
/// assert!(prompt.as_str().contains("What is the capital of Japan?"));
/// assert!(prompt.as_str().ends_with("Assistant:"));
/// ```
pub fn build_prompt(question: &str, evidence: &EvidenceList) -> Prompt {
    tracing::debug!("Building prompt with {} evidence entries", evidence.len());

    let evidence_json = evidence.to_json();

    let mut text = String::with_capacity(
        HUMAN_TAG.len()
            + INSTRUCTION.len()
            + question.len()
            + evidence_json.len()
            + ASSISTANT_TAG.len()
            + 64,
    );

    text.push_str(HUMAN_TAG);
    text.push('\n');
    text.push_str(INSTRUCTION);
    text.push('\n');
    text.push_str(QUESTION_HEADER);
    text.push('\n');
    text.push_str(question);
    text.push('\n');
    text.push_str(REFERENCE_HEADER);
    text.push('\n');
    text.push_str(&evidence_json);
    text.push_str(ASSISTANT_TAG);

    Prompt::new(text)
}
