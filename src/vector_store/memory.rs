//! In-memory vector store implementation.
//!
//! Useful for testing and local development against a small review set.

use super::{cosine_similarity, RetrievedItem, VectorStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// A review item paired with its embedding.
#[derive(Debug, Clone)]
pub struct StoredItem {
    pub id: String,
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub embedding: Vec<f32>,
}

/// In-memory vector store.
pub struct MemoryVectorStore {
    items: RwLock<Vec<StoredItem>>,
}

impl MemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-populated with items.
    pub fn with_items(items: Vec<StoredItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Add an item to the store.
    pub fn insert(&self, item: StoredItem) {
        self.items.write().unwrap().push(item);
    }
}

impl Default for MemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedItem>> {
        let items = self.items.read().unwrap();

        let mut results: Vec<RetrievedItem> = items
            .iter()
            .map(|item| RetrievedItem {
                id: item.id.clone(),
                score: cosine_similarity(embedding, &item.embedding),
                metadata: item.metadata.clone(),
            })
            .collect();

        // Stable sort keeps insertion order for tied scores.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        Ok(results)
    }
}
