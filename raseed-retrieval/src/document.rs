//! Generic documents and scored search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A free-text document with its vector embedding, used for non-receipt
/// knowledge. Receipts also surface through semantic search as documents
/// rendered from their search text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The text content.
    pub text: String,
    /// Key-value metadata. Receipt-derived documents carry
    /// `kind = "receipt"` and the merchant name.
    pub metadata: HashMap<String, String>,
    /// The embedding of `text`. Its length must match the configured
    /// embedding dimension.
    pub embedding: Vec<f32>,
}

/// A retrieved [`Document`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// The retrieved document.
    pub document: Document,
    /// The cosine similarity score (higher is more relevant).
    pub score: f32,
}
