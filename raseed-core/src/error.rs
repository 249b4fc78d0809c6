//! Error types for the `raseed-core` crate.

use thiserror::Error;

/// Errors surfaced by the tool layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A tool invocation failed. The message carries the underlying
    /// error unchanged so the calling agent can decide how to phrase it.
    #[error("Tool error: {0}")]
    Tool(String),

    /// The tool registry was misconfigured (e.g. duplicate tool names).
    #[error("Registry error: {0}")]
    Registry(String),
}

/// A convenience result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
