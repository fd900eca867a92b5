//! Vector store abstraction for Lektor.
//!
//! Provides a trait-based interface over the external similarity-search
//! service holding the professor review corpus. The corpus is assumed to be
//! already populated; this crate only queries it.

mod memory;
mod pinecone;

pub use memory::MemoryVectorStore;
pub use pinecone::PineconeStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single review item retrieved from the vector store.
///
/// Request-scoped: produced by a query, consumed by the context formatter,
/// then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedItem {
    /// Item identifier (the professor name).
    pub id: String,
    /// Similarity score (higher is more similar).
    #[serde(default)]
    pub score: f32,
    /// Named metadata fields (review text, subject, star rating).
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl RetrievedItem {
    /// Render a metadata field as plain text, or empty if absent.
    pub fn field(&self, name: &str) -> String {
        match self.metadata.get(name) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

/// Trait for vector store implementations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Query the `top_k` most similar items to the embedding, metadata
    /// included, ranked most similar first. An empty result is not an error.
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedItem>>;
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_field_rendering() {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            "review".to_string(),
            serde_json::Value::String("Great lectures".to_string()),
        );
        metadata.insert("stars".to_string(), serde_json::json!(4.5));

        let item = RetrievedItem {
            id: "Dr. Ada".to_string(),
            score: 0.9,
            metadata,
        };

        assert_eq!(item.field("review"), "Great lectures");
        assert_eq!(item.field("stars"), "4.5");
        assert_eq!(item.field("missing"), "");
    }
}
