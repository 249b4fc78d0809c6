//! # raseed-core
//!
//! Core abstractions shared across the Raseed workspace: the [`Tool`]
//! trait that agent runtimes invoke, the [`ToolContext`] carrying session
//! identity, and the immutable [`ToolRegistry`] mapping tool names to
//! handlers.
//!
//! The agent runtime itself (the hosted LLM deciding which tool to call)
//! is an external collaborator; this crate only defines the contract it
//! consumes.

mod error;
mod registry;
mod tool;

pub use error::{CoreError, Result};
pub use registry::{ToolRegistry, ToolRegistryBuilder};
pub use tool::{SessionContext, Tool, ToolContext};
