//! Retrieval router: translates tool invocations into store and
//! embedding calls.
//!
//! The router is a stateless request-to-query translator. It never
//! classifies intent — the external agent picks the tool, and the tool
//! name is the intent signal. Composition follows the builder pattern:
//!
//! ```rust,ignore
//! let router = RetrievalRouter::builder()
//!     .config(RouterConfig::default())
//!     .store(Arc::new(InMemoryDocumentStore::new(embedder.dimensions())))
//!     .embedder(Arc::new(embedder))
//!     .build()?;
//!
//! let matches = router.query_receipts(&ReceiptFilter::any()).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::RouterConfig;
use crate::document::{Document, ScoredDocument};
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};
use crate::filter::ReceiptFilter;
use crate::receipt::{NewReceipt, Receipt};
use crate::store::DocumentStore;

/// The result of a structured receipt query.
///
/// Zero matches is a normal outcome, reported through `no_matches` rather
/// than an error, so the calling agent can phrase a "nothing found" reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptMatches {
    /// Matching receipts, ordered by timestamp descending.
    pub receipts: Vec<Receipt>,
    /// True when no record satisfied the filter.
    pub no_matches: bool,
}

/// Translates declared-intent operations into concrete store queries.
///
/// Holds no persistent state of its own; the store exclusively owns
/// persistence. Construct one via [`RetrievalRouter::builder()`].
pub struct RetrievalRouter {
    config: RouterConfig,
    store: Arc<dyn DocumentStore>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl RetrievalRouter {
    /// Create a new [`RetrievalRouterBuilder`].
    pub fn builder() -> RetrievalRouterBuilder {
        RetrievalRouterBuilder::default()
    }

    /// Return a reference to the router configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Return a reference to the document store.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Structured query: return receipts satisfying `filter`, newest
    /// first, capped at `config.max_results`.
    ///
    /// Read-only and idempotent. An empty filter matches all receipts.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Store`] if the store read fails. Zero
    /// matches is not an error.
    pub async fn query_receipts(&self, filter: &ReceiptFilter) -> Result<ReceiptMatches> {
        let receipts = self.store.get_receipts(filter, self.config.max_results).await?;
        let no_matches = receipts.is_empty();
        info!(count = receipts.len(), no_matches, "structured receipt query completed");
        Ok(ReceiptMatches { receipts, no_matches })
    }

    /// Ingest a receipt: validate, embed its search text, persist.
    ///
    /// Returns the generated receipt id. The write happens only after the
    /// embedding succeeds, so a failed embedding leaves no partial record.
    ///
    /// # Errors
    ///
    /// [`RetrievalError::Validation`] for malformed input,
    /// [`RetrievalError::Embedding`] when the embedding call fails after
    /// the retry, [`RetrievalError::Store`] when the write fails.
    pub async fn add_receipt(&self, record: NewReceipt) -> Result<String> {
        record.validate()?;

        let id = format!("rcpt_{}", Uuid::new_v4());
        let receipt = record.into_receipt(id, Vec::new());
        let embedding = self.embed_with_retry(&receipt.search_text()).await?;
        let receipt = Receipt { embedding, ..receipt };

        let id = self.store.put_receipt(receipt).await.map_err(|e| {
            error!(error = %e, "receipt write failed");
            e
        })?;
        info!(receipt.id = %id, "receipt ingested");
        Ok(id)
    }

    /// Ingest a generic free-text document for non-receipt knowledge.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`add_receipt`](RetrievalRouter::add_receipt),
    /// minus validation of receipt fields.
    pub async fn add_document(
        &self,
        text: impl Into<String>,
        metadata: HashMap<String, String>,
    ) -> Result<String> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(RetrievalError::Validation("document text must not be empty".into()));
        }

        let embedding = self.embed_with_retry(&text).await?;
        let document =
            Document { id: format!("doc_{}", Uuid::new_v4()), text, metadata, embedding };
        let id = self.store.put_document(document).await?;
        info!(document.id = %id, "document ingested");
        Ok(id)
    }

    /// Semantic search: embed the query and return the `top_k` most
    /// similar stored records, scored and sorted descending.
    ///
    /// # Errors
    ///
    /// [`RetrievalError::Validation`] when `top_k` is zero,
    /// [`RetrievalError::Embedding`] when the query embedding fails after
    /// the retry, [`RetrievalError::Store`] when the search fails.
    pub async fn semantic_search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredDocument>> {
        if top_k == 0 {
            return Err(RetrievalError::Validation("top_k must be greater than zero".into()));
        }

        let query_embedding = self.embed_with_retry(query).await?;
        let results = self.store.similarity_search(&query_embedding, top_k).await?;
        info!(result_count = results.len(), top_k, "semantic search completed");
        Ok(results)
    }

    /// Embed `text` with a bounded timeout, retrying once after a short
    /// backoff. Failures are never cached.
    async fn embed_with_retry(&self, text: &str) -> Result<Vec<f32>> {
        match self.embed_once(text).await {
            Ok(embedding) => Ok(embedding),
            Err(first) => {
                warn!(error = %first, "embedding failed, retrying once");
                tokio::time::sleep(self.config.retry_backoff).await;
                self.embed_once(text).await.map_err(|e| {
                    error!(error = %e, "embedding failed after retry");
                    e
                })
            }
        }
    }

    async fn embed_once(&self, text: &str) -> Result<Vec<f32>> {
        debug!(text_len = text.len(), "embedding text");
        tokio::time::timeout(self.config.embed_timeout, self.embedder.embed(text))
            .await
            .map_err(|_| RetrievalError::Embedding {
                provider: "embedder".into(),
                message: format!(
                    "embedding call timed out after {:?}",
                    self.config.embed_timeout
                ),
            })?
    }
}

/// Builder for constructing a [`RetrievalRouter`].
///
/// The store and embedder are required; the config defaults when unset.
#[derive(Default)]
pub struct RetrievalRouterBuilder {
    config: Option<RouterConfig>,
    store: Option<Arc<dyn DocumentStore>>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
}

impl RetrievalRouterBuilder {
    /// Set the router configuration.
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the document store backend.
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Build the [`RetrievalRouter`], validating that required fields are
    /// set and that the store and embedder agree on dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Config`] if a required field is missing
    /// or the embedding dimensions disagree.
    pub fn build(self) -> Result<RetrievalRouter> {
        let config = self.config.unwrap_or_default();
        let store =
            self.store.ok_or_else(|| RetrievalError::Config("store is required".into()))?;
        let embedder =
            self.embedder.ok_or_else(|| RetrievalError::Config("embedder is required".into()))?;

        if store.dimensions() != embedder.dimensions() {
            return Err(RetrievalError::Config(format!(
                "store expects {}-dimensional embeddings, provider produces {}",
                store.dimensions(),
                embedder.dimensions()
            )));
        }

        Ok(RetrievalRouter { config, store, embedder })
    }
}
