//! # raseed-retrieval
//!
//! The retrieval core of the Raseed receipts assistant. An external LLM
//! agent classifies user intent and invokes one of three tools; this crate
//! supplies everything behind that boundary:
//!
//! - the receipt/document data model and the conjunctive [`ReceiptFilter`]
//! - the [`DocumentStore`] seam with an in-memory backend
//! - the [`EmbeddingProvider`] seam with a Gemini REST backend
//!   (feature `gemini`)
//! - the [`RetrievalRouter`] translating tool invocations into store and
//!   embedding calls
//! - the tool adapters exposed to the agent via `raseed-core`
//!
//! The router holds no persistent state and never classifies intent
//! itself: the declared tool name is the intent signal.

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod filter;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod inmemory;
pub mod receipt;
pub mod router;
pub mod sample;
pub mod store;
pub mod timeframe;
pub mod tools;

pub use config::{RouterConfig, RouterConfigBuilder};
pub use document::{Document, ScoredDocument};
pub use embedding::EmbeddingProvider;
pub use error::{RetrievalError, Result};
pub use filter::ReceiptFilter;
#[cfg(feature = "gemini")]
pub use gemini::GeminiEmbeddingProvider;
pub use inmemory::InMemoryDocumentStore;
pub use receipt::{Category, LineItem, NewReceipt, Receipt};
pub use router::{ReceiptMatches, RetrievalRouter, RetrievalRouterBuilder};
pub use store::DocumentStore;
pub use tools::{AddReceiptTool, QueryReceiptsTool, SemanticSearchTool, toolset};
