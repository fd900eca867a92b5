//! Pinecone-backed vector store client.
//!
//! Queries a remote index over HTTP. Responses are parsed into explicit
//! schema types; anything the index returns that does not fit the schema is
//! an upstream error, never a silent field access.

use super::{RetrievedItem, VectorStore};
use crate::error::{LektorError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Environment variable holding the index API key.
const API_KEY_VAR: &str = "PINECONE_API_KEY";

/// Timeout for index queries.
const QUERY_TIMEOUT_SECS: u64 = 30;

/// Vector store client for a Pinecone-style HTTP index.
pub struct PineconeStore {
    client: reqwest::Client,
    index_host: String,
    namespace: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    top_k: usize,
    include_metadata: bool,
    vector: &'a [f32],
    namespace: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Deserialize)]
struct Match {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: BTreeMap<String, serde_json::Value>,
}

impl PineconeStore {
    /// Create a new store client for the given index host and namespace.
    ///
    /// Reads the API key from `PINECONE_API_KEY`.
    pub fn new(index_host: &str, namespace: &str) -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| LektorError::Config(format!("{} is not set", API_KEY_VAR)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(QUERY_TIMEOUT_SECS))
            .build()
            .map_err(|e| LektorError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            index_host: index_host.trim_end_matches('/').to_string(),
            namespace: namespace.to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl VectorStore for PineconeStore {
    #[instrument(skip(self, embedding), fields(top_k = top_k))]
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedItem>> {
        let request = QueryRequest {
            top_k,
            include_metadata: true,
            vector: embedding,
            namespace: &self.namespace,
        };

        let response = self
            .client
            .post(format!("{}/query", self.index_host))
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LektorError::VectorStore(format!("Query request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LektorError::VectorStore(format!(
                "Index returned {}: {}",
                status, body
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| LektorError::VectorStore(format!("Malformed query response: {}", e)))?;

        debug!("Retrieved {} matches", parsed.matches.len());

        Ok(parsed
            .matches
            .into_iter()
            .map(|m| RetrievedItem {
                id: m.id,
                score: m.score,
                metadata: m.metadata,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_wire_shape() {
        let vector = vec![0.1, 0.2];
        let request = QueryRequest {
            top_k: 3,
            include_metadata: true,
            vector: &vector,
            namespace: "ns1",
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["topK"], 3);
        assert_eq!(json["includeMetadata"], true);
        assert_eq!(json["namespace"], "ns1");
        assert_eq!(json["vector"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "matches": [
                {"id": "Dr. Ada", "score": 0.92, "metadata": {"review": "Clear and patient", "subject": "Algorithms", "stars": 5}},
                {"id": "Dr. Bob", "score": 0.81, "metadata": {"review": "Tough grader", "subject": "Systems", "stars": 3}}
            ]
        }"#;

        let parsed: QueryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.matches.len(), 2);
        assert_eq!(parsed.matches[0].id, "Dr. Ada");
        assert!(parsed.matches[0].score > parsed.matches[1].score);
    }

    #[test]
    fn test_empty_response_parses_to_no_matches() {
        let parsed: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.matches.is_empty());
    }
}
