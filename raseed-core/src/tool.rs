//! The tool contract consumed by agent runtimes.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Per-invocation context passed to every tool call.
///
/// Carries the identity of the session the call belongs to. Tools must not
/// keep state across calls; anything session-scoped comes in through here.
pub trait ToolContext: Send + Sync {
    /// The transport-layer session this call belongs to.
    fn session_id(&self) -> &str;

    /// The user whose data the tool operates on.
    fn user_id(&self) -> &str;
}

/// A plain [`ToolContext`] implementation for servers and tests.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session_id: String,
    user_id: String,
}

impl SessionContext {
    /// Create a context for the given session and user.
    pub fn new(session_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self { session_id: session_id.into(), user_id: user_id.into() }
    }
}

impl ToolContext for SessionContext {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// A named operation an agent can invoke with JSON arguments.
///
/// Implementations adapt some underlying capability (retrieval, ingestion,
/// search) to a fixed declarative schema. Adapters must be pure: read
/// operations are idempotent, and errors from the underlying layer are
/// surfaced unchanged rather than swallowed.
///
/// # Example
///
/// ```rust,ignore
/// let result = tool.execute(ctx, json!({ "query": "milk" })).await?;
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool name the agent calls it by.
    fn name(&self) -> &str;

    /// A one-line description shown to the agent.
    fn description(&self) -> &str;

    /// JSON schema for the tool's parameters, if any.
    fn parameters_schema(&self) -> Option<Value> {
        None
    }

    /// JSON schema for the tool's return value, if declared.
    fn response_schema(&self) -> Option<Value> {
        None
    }

    /// Execute the tool with the given arguments.
    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value>;
}
