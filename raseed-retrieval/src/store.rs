//! Document store trait: structured reads, writes, and similarity search.

use async_trait::async_trait;

use crate::document::{Document, ScoredDocument};
use crate::error::Result;
use crate::filter::ReceiptFilter;
use crate::receipt::Receipt;

/// A storage backend for receipts and generic documents.
///
/// The store exclusively owns persistence. Backends must serialize
/// concurrent writes internally and must reject records whose embedding
/// length does not match [`dimensions`](DocumentStore::dimensions).
///
/// # Example
///
/// ```rust,ignore
/// let store = InMemoryDocumentStore::new(768);
/// let id = store.put_receipt(receipt).await?;
/// let matches = store.get_receipts(&ReceiptFilter::any(), 50).await?;
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return receipts satisfying every constraint in `filter`, ordered
    /// by timestamp descending and capped at `limit`.
    async fn get_receipts(&self, filter: &ReceiptFilter, limit: usize) -> Result<Vec<Receipt>>;

    /// Persist a receipt, returning its identifier.
    ///
    /// Fails with [`RetrievalError::Store`](crate::RetrievalError::Store)
    /// when the embedding dimension does not match the store's.
    async fn put_receipt(&self, receipt: Receipt) -> Result<String>;

    /// Persist a generic document, returning its identifier.
    async fn put_document(&self, document: Document) -> Result<String>;

    /// Return the `top_k` stored records most similar to `embedding`,
    /// ordered by descending similarity score. Ties within a small
    /// epsilon are stable by insertion order.
    async fn similarity_search(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredDocument>>;

    /// The embedding dimension this store was configured with.
    fn dimensions(&self) -> usize;
}
