//! In-memory document store using cosine similarity.
//!
//! This module provides [`InMemoryDocumentStore`], a zero-dependency
//! backend protected by a `tokio::sync::RwLock`. It is suitable for
//! development, testing, and demos; production deployments plug a managed
//! database in behind the same [`DocumentStore`] trait.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Document, ScoredDocument};
use crate::error::{Result, RetrievalError};
use crate::filter::ReceiptFilter;
use crate::receipt::Receipt;
use crate::store::DocumentStore;

/// Scores closer than this compare equal, keeping insertion order stable.
const SCORE_EPSILON: f32 = 1e-6;

const BACKEND: &str = "InMemory";

#[derive(Debug, Default)]
struct Inner {
    // Vecs keep insertion order, which is what makes the similarity
    // tie-break stable.
    receipts: Vec<Receipt>,
    documents: Vec<Document>,
}

/// An in-memory [`DocumentStore`] using cosine similarity for search.
///
/// Receipts and generic documents live in insertion-ordered `Vec`s behind
/// one `RwLock`; concurrent writes serialize on the lock.
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    dimensions: usize,
    inner: RwLock<Inner>,
}

impl InMemoryDocumentStore {
    /// Create an empty store for embeddings of the given dimension.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, inner: RwLock::new(Inner::default()) }
    }

    fn check_dimension(&self, len: usize, what: &str) -> Result<()> {
        if len != self.dimensions {
            return Err(RetrievalError::Store {
                backend: BACKEND.to_string(),
                message: format!(
                    "{what} embedding has {len} dimensions, store expects {}",
                    self.dimensions
                ),
            });
        }
        Ok(())
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Render a receipt as the document it surfaces as in semantic search.
fn receipt_as_document(receipt: &Receipt) -> Document {
    let mut metadata = std::collections::HashMap::new();
    metadata.insert("kind".to_string(), "receipt".to_string());
    metadata.insert("merchant".to_string(), receipt.merchant.clone());
    Document {
        id: receipt.id.clone(),
        text: receipt.search_text(),
        metadata,
        embedding: receipt.embedding.clone(),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_receipts(&self, filter: &ReceiptFilter, limit: usize) -> Result<Vec<Receipt>> {
        let inner = self.inner.read().await;
        let mut matched: Vec<Receipt> =
            inner.receipts.iter().filter(|r| filter.matches(r)).cloned().collect();
        // Newest first; equal timestamps keep insertion order (stable sort).
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matched.truncate(limit);
        Ok(matched)
    }

    async fn put_receipt(&self, receipt: Receipt) -> Result<String> {
        self.check_dimension(receipt.embedding.len(), "receipt")?;
        let id = receipt.id.clone();
        let mut inner = self.inner.write().await;
        inner.receipts.push(receipt);
        Ok(id)
    }

    async fn put_document(&self, document: Document) -> Result<String> {
        self.check_dimension(document.embedding.len(), "document")?;
        let id = document.id.clone();
        let mut inner = self.inner.write().await;
        inner.documents.push(document);
        Ok(id)
    }

    async fn similarity_search(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredDocument>> {
        self.check_dimension(embedding.len(), "query")?;
        let inner = self.inner.read().await;

        // Receipts surface as documents rendered from their search text;
        // they score against the same embedding that was computed on it.
        let mut scored: Vec<ScoredDocument> = inner
            .receipts
            .iter()
            .map(receipt_as_document)
            .chain(inner.documents.iter().cloned())
            .map(|document| {
                let score = cosine_similarity(&document.embedding, embedding);
                ScoredDocument { document, score }
            })
            .collect();

        // Quantize scores to SCORE_EPSILON buckets and stable-sort
        // descending: scores within the epsilon compare equal and keep
        // insertion order.
        scored.sort_by_key(|r| std::cmp::Reverse((r.score / SCORE_EPSILON).round() as i64));
        scored.truncate(top_k);
        Ok(scored)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn doc(id: &str, embedding: Vec<f32>) -> Document {
        Document { id: id.into(), text: format!("doc {id}"), metadata: HashMap::new(), embedding }
    }

    #[tokio::test]
    async fn rejects_mismatched_dimensions() {
        let store = InMemoryDocumentStore::new(3);
        let err = store.put_document(doc("d1", vec![1.0, 0.0])).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Store { .. }));

        let err = store.similarity_search(&[1.0, 0.0], 5).await.unwrap_err();
        assert!(matches!(err, RetrievalError::Store { .. }));
    }

    #[tokio::test]
    async fn equal_scores_keep_insertion_order() {
        let store = InMemoryDocumentStore::new(2);
        // Both documents are identical to the query direction, so their
        // scores tie exactly.
        store.put_document(doc("first", vec![1.0, 0.0])).await.unwrap();
        store.put_document(doc("second", vec![1.0, 0.0])).await.unwrap();
        store.put_document(doc("worse", vec![0.0, 1.0])).await.unwrap();

        let results = store.similarity_search(&[1.0, 0.0], 3).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "worse"]);
    }

    #[test]
    fn zero_magnitude_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
