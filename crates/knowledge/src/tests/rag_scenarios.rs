//! End-to-end request scenarios against backend doubles.

use super::doubles::{StubGeneration, StubSearch};
use crate::rag::{Orchestrator, Stage};
use crate::search::SearchHit;
use kotae_core::{AppError, RagSettings};
use std::sync::Arc;

const MODEL_ID: &str = "anthropic.claude-v2";

fn settings() -> RagSettings {
    RagSettings::new(Some("idx-1234".to_string()), Some(MODEL_ID.to_string()))
}

fn orchestrator(
    search: &Arc<StubSearch>,
    generation: &Arc<StubGeneration>,
    settings: RagSettings,
) -> Orchestrator {
    Orchestrator::new(search.clone(), generation.clone(), settings)
}

#[tokio::test]
async fn test_answers_question_from_evidence() {
    let search = Arc::new(StubSearch::returning(vec![SearchHit::with_excerpt(
        "Tokyo is the capital of Japan.",
    )]));
    let generation = Arc::new(StubGeneration::replying(r#"{"completion": "Tokyo."}"#));

    let answer = orchestrator(&search, &generation, settings())
        .handle("What is the capital of Japan?")
        .await
        .unwrap();
    assert_eq!(answer.as_deref(), Some("Tokyo."));

    let requests = generation.requests();
    assert_eq!(requests.len(), 1);
    let (prompt, model_id) = &requests[0];
    assert_eq!(model_id, MODEL_ID);
    assert!(prompt.contains("What is the capital of Japan?"));
    assert!(prompt.contains(r#"["Tokyo is the capital of Japan."]"#));

    let queries = search.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].index_id, "idx-1234");
    assert_eq!(queries[0].language_code, "ja");
}

#[tokio::test]
async fn test_completion_round_trip() {
    let search = Arc::new(StubSearch::returning(vec![]));
    let generation = Arc::new(StubGeneration::replying(r#"{"completion": "X"}"#));

    let answer = orchestrator(&search, &generation, settings())
        .handle("q")
        .await
        .unwrap();
    assert_eq!(answer, Some("X".to_string()));
}

#[tokio::test]
async fn test_zero_results_still_generates() {
    let search = Arc::new(StubSearch::returning(vec![]));
    let generation = Arc::new(StubGeneration::replying(r#"{"completion": "わかりません。"}"#));

    let answer = orchestrator(&search, &generation, settings())
        .handle("未知の質問")
        .await
        .unwrap();
    assert_eq!(answer.as_deref(), Some("わかりません。"));

    let requests = generation.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].0.contains("[参考]\n[]\n\nAssistant:"));
}

#[tokio::test]
async fn test_missing_completion_returns_none() {
    let search = Arc::new(StubSearch::returning(vec![SearchHit::with_excerpt("x")]));
    let generation = Arc::new(StubGeneration::replying(r#"{"stop_reason": "max_tokens"}"#));

    let answer = orchestrator(&search, &generation, settings())
        .handle("q")
        .await
        .unwrap();
    assert_eq!(answer, None);
}

#[tokio::test]
async fn test_search_failure_skips_generation() {
    let search = Arc::new(StubSearch::failing(
        "AccessDeniedException: not authorized to perform kendra:Query",
    ));
    let generation = Arc::new(StubGeneration::replying(r#"{"completion": "unused"}"#));

    let err = orchestrator(&search, &generation, settings())
        .handle("q")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Retrieval(_)));
    assert!(generation.requests().is_empty());
}

#[tokio::test]
async fn test_missing_index_id_fails_before_any_call() {
    let search = Arc::new(StubSearch::returning(vec![]));
    let generation = Arc::new(StubGeneration::replying(r#"{"completion": "unused"}"#));

    let err = orchestrator(
        &search,
        &generation,
        RagSettings::new(None, Some(MODEL_ID.to_string())),
    )
    .handle("q")
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Config(_)));
    assert!(search.queries().is_empty());
    assert!(generation.requests().is_empty());
}

#[tokio::test]
async fn test_missing_model_id_fails_before_any_call() {
    let search = Arc::new(StubSearch::returning(vec![]));
    let generation = Arc::new(StubGeneration::replying(r#"{"completion": "unused"}"#));

    let err = orchestrator(
        &search,
        &generation,
        RagSettings::new(Some("idx-1234".to_string()), Some(String::new())),
    )
    .handle("q")
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Config(_)));
    assert!(search.queries().is_empty());
}

#[tokio::test]
async fn test_generation_failure_propagates() {
    let search = Arc::new(StubSearch::returning(vec![SearchHit::with_excerpt("x")]));
    let generation = Arc::new(StubGeneration::failing(
        "ValidationException: The provided model identifier is invalid.",
    ));

    let err = orchestrator(&search, &generation, settings())
        .handle("q")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Generation(_)));
    assert_eq!(generation.requests().len(), 1);
}

#[tokio::test]
async fn test_malformed_body_propagates() {
    let search = Arc::new(StubSearch::returning(vec![]));
    let generation = Arc::new(StubGeneration::replying("<html>Bad Gateway</html>"));

    let err = orchestrator(&search, &generation, settings())
        .handle("q")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_prompt_carries_at_most_five_excerpts() {
    let hits = (1..=7)
        .map(|i| SearchHit::with_excerpt(format!("抜粋{}", i)))
        .collect();
    let search = Arc::new(StubSearch::returning(hits));
    let generation = Arc::new(StubGeneration::replying(r#"{"completion": "ok"}"#));

    orchestrator(&search, &generation, settings())
        .handle("q")
        .await
        .unwrap();

    let prompt = &generation.requests()[0].0;
    assert!(prompt.contains(r#"["抜粋1","抜粋2","抜粋3","抜粋4","抜粋5"]"#));
    assert!(!prompt.contains("抜粋6"));
}

#[tokio::test]
async fn test_handles_are_reused_across_requests() {
    let search = Arc::new(StubSearch::returning(vec![SearchHit::with_excerpt("x")]));
    let generation = Arc::new(StubGeneration::replying(r#"{"completion": "ok"}"#));
    let orchestrator = orchestrator(&search, &generation, settings());

    for question in ["first", "second"] {
        assert_eq!(
            orchestrator.handle(question).await.unwrap().as_deref(),
            Some("ok")
        );
    }

    let questions: Vec<_> = search.queries().into_iter().map(|q| q.question).collect();
    assert_eq!(questions, ["first", "second"]);
}

#[tokio::test]
async fn test_successful_request_ends_in_done() {
    let search = Arc::new(StubSearch::returning(vec![SearchHit::with_excerpt("x")]));
    let generation = Arc::new(StubGeneration::replying(r#"{"completion": "ok"}"#));

    let (stage, result) = orchestrator(&search, &generation, settings())
        .process("q")
        .await;
    assert_eq!(stage, Stage::Done);
    assert_eq!(result.unwrap().as_deref(), Some("ok"));
}

#[tokio::test]
async fn test_failed_request_ends_in_failed() {
    let search = Arc::new(StubSearch::failing("ThrottlingException: Rate exceeded"));
    let generation = Arc::new(StubGeneration::replying(r#"{"completion": "unused"}"#));

    let (stage, result) = orchestrator(&search, &generation, settings())
        .process("q")
        .await;
    assert_eq!(stage, Stage::Failed);
    assert!(matches!(result, Err(AppError::Retrieval(_))));

    let (stage, result) = orchestrator(&search, &generation, RagSettings::new(None, None))
        .process("q")
        .await;
    assert_eq!(stage, Stage::Failed);
    assert!(matches!(result, Err(AppError::Config(_))));
}
