//! Amazon Kendra search provider.
//!
//! Runs the Kendra `Query` operation restricted to one content language and
//! keeps each result's document excerpt.

use crate::search::{RetrievalQuery, SearchClient, SearchHit};
use aws_sdk_kendra::error::DisplayErrorContext;
use aws_sdk_kendra::operation::query::QueryOutput;
use aws_sdk_kendra::types::{AttributeFilter, DocumentAttribute, DocumentAttributeValue};
use kotae_core::{AppError, AppResult};

/// Kendra's built-in document language attribute.
pub const LANGUAGE_ATTRIBUTE_KEY: &str = "_language_code";

/// Kendra search client.
#[derive(Debug, Clone)]
pub struct KendraSearchClient {
    client: aws_sdk_kendra::Client,
}

impl KendraSearchClient {
    /// Wrap an existing SDK client.
    pub fn new(client: aws_sdk_kendra::Client) -> Self {
        Self { client }
    }

    /// Create a client from shared AWS configuration.
    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_kendra::Client::new(config))
    }
}

/// Filter matching documents whose language attribute equals `language_code`.
fn language_filter(language_code: &str) -> AppResult<AttributeFilter> {
    let attribute = DocumentAttribute::builder()
        .key(LANGUAGE_ATTRIBUTE_KEY)
        .value(
            DocumentAttributeValue::builder()
                .string_value(language_code)
                .build(),
        )
        .build()
        .map_err(|e| AppError::Retrieval(format!("Invalid language filter: {}", e)))?;

    Ok(AttributeFilter::builder().equals_to(attribute).build())
}

/// Reduce a query response to search hits, keeping backend order.
fn hits_from_output(output: &QueryOutput) -> Vec<SearchHit> {
    output
        .result_items()
        .iter()
        .map(|item| SearchHit {
            document_id: item.document_id().map(str::to_string),
            excerpt: item
                .document_excerpt()
                .and_then(|excerpt| excerpt.text())
                .map(str::to_string),
        })
        .collect()
}

#[async_trait::async_trait]
impl SearchClient for KendraSearchClient {
    fn provider_name(&self) -> &str {
        "kendra"
    }

    async fn query(&self, query: &RetrievalQuery) -> AppResult<Vec<SearchHit>> {
        tracing::debug!(
            "Sending Kendra query to index {} (language {})",
            query.index_id,
            query.language_code
        );

        let output = self
            .client
            .query()
            .index_id(&query.index_id)
            .query_text(&query.question)
            .attribute_filter(language_filter(&query.language_code)?)
            .send()
            .await
            .map_err(|e| {
                AppError::Retrieval(format!(
                    "Kendra query on index {} failed: {}",
                    query.index_id,
                    DisplayErrorContext(&e)
                ))
            })?;

        let hits = hits_from_output(&output);
        tracing::debug!(
            "Kendra returned {} results (total {:?})",
            hits.len(),
            output.total_number_of_results()
        );

        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::server::serve_once;
    use aws_sdk_kendra::config::retry::RetryConfig;
    use aws_sdk_kendra::config::{BehaviorVersion, Credentials, Region};
    use aws_sdk_kendra::types::{QueryResultItem, TextWithHighlights};

    fn local_client(endpoint: &str) -> KendraSearchClient {
        let config = aws_sdk_kendra::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("ap-northeast-1"))
            .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
            .endpoint_url(endpoint)
            .retry_config(RetryConfig::disabled())
            .build();
        KendraSearchClient::new(aws_sdk_kendra::Client::from_conf(config))
    }

    const QUERY_RESPONSE: &str = concat!(
        r#"{"ResultItems":[{"Id":"r-1","DocumentId":"doc-1","#,
        r#""DocumentExcerpt":{"Text":"Tokyo is the capital of Japan."}}],"#,
        r#""TotalNumberOfResults":1}"#,
    );

    fn query() -> RetrievalQuery {
        RetrievalQuery {
            question: "What is the capital of Japan?".to_string(),
            index_id: "idx-1234".to_string(),
            language_code: "ja".to_string(),
        }
    }

    #[test]
    fn test_language_filter() {
        let filter = language_filter("ja").unwrap();
        assert!(filter.equals_to().is_some());

        let rendered = format!("{:?}", filter);
        assert!(rendered.contains("_language_code"));
        assert!(rendered.contains("\"ja\""));
    }

    #[test]
    fn test_hits_from_output() {
        let output = QueryOutput::builder()
            .result_items(
                QueryResultItem::builder()
                    .document_id("doc-1")
                    .document_excerpt(
                        TextWithHighlights::builder()
                            .text("東京は日本の首都です。")
                            .build(),
                    )
                    .build(),
            )
            .result_items(QueryResultItem::builder().document_id("doc-2").build())
            .build();

        let hits = hits_from_output(&output);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].document_id.as_deref(), Some("doc-1"));
        assert_eq!(hits[0].excerpt.as_deref(), Some("東京は日本の首都です。"));
        assert_eq!(hits[1].excerpt, None);
    }

    #[test]
    fn test_hits_from_empty_output() {
        let output = QueryOutput::builder().build();
        assert!(hits_from_output(&output).is_empty());
    }

    #[tokio::test]
    async fn test_query_request() {
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", QUERY_RESPONSE).await;
        let client = local_client(&endpoint);

        let hits = client.query(&query()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document_id.as_deref(), Some("doc-1"));
        assert_eq!(hits[0].excerpt.as_deref(), Some("Tokyo is the capital of Japan."));

        let raw_request = server.await.unwrap();
        assert!(raw_request.starts_with("POST / HTTP/1.1"));
        assert!(raw_request
            .to_lowercase()
            .contains("x-amz-target: awskendrafrontendservice.query"));
        assert!(raw_request.contains(r#""IndexId":"idx-1234""#));
        assert!(raw_request.contains(r#""QueryText":"What is the capital of Japan?""#));
        assert!(raw_request.contains(r#""EqualsTo":{"Key":"_language_code""#));
        assert!(raw_request.contains(r#""StringValue":"ja""#));
    }

    #[tokio::test]
    async fn test_query_service_error() {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 400 Bad Request",
            r#"{"__type":"AccessDeniedException","message":"Not authorized"}"#,
        )
        .await;
        let client = local_client(&endpoint);

        let err = client.query(&query()).await.unwrap_err();
        match err {
            AppError::Retrieval(msg) => assert!(msg.contains("idx-1234")),
            other => panic!("Expected retrieval error, got {:?}", other),
        }

        server.await.unwrap();
    }
}
