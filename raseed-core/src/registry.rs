//! Fixed tool registry built once at startup.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::error::{CoreError, Result};
use crate::tool::Tool;

/// An immutable mapping from tool name to handler.
///
/// Built once at startup via [`ToolRegistry::builder`] and never mutated
/// afterwards. The agent runtime lists the declared schemas through
/// [`declarations`](ToolRegistry::declarations) and dispatches calls through
/// [`get`](ToolRegistry::get).
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    // Registration order, so declarations are listed deterministically.
    order: Vec<String>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry").field("order", &self.order).finish_non_exhaustive()
    }
}

impl ToolRegistry {
    /// Create a new [`ToolRegistryBuilder`].
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// The number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Declarative schema entries for every tool, in registration order.
    ///
    /// This is the shape handed to the agent runtime so it can decide
    /// which tool to invoke.
    pub fn declarations(&self) -> Vec<Value> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| {
                let mut decl = json!({
                    "name": tool.name(),
                    "description": tool.description(),
                });
                if let Some(params) = tool.parameters_schema() {
                    decl["parameters"] = params;
                }
                if let Some(response) = tool.response_schema() {
                    decl["response"] = response;
                }
                decl
            })
            .collect()
    }
}

/// Builder for a [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistryBuilder {
    /// Register a tool. Duplicate names are rejected at build time.
    pub fn register(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Build the registry, validating that tool names are unique.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Registry`] if two tools share a name.
    pub fn build(self) -> Result<ToolRegistry> {
        let mut tools = HashMap::new();
        let mut order = Vec::with_capacity(self.tools.len());
        for tool in self.tools {
            let name = tool.name().to_string();
            if tools.insert(name.clone(), tool).is_some() {
                return Err(CoreError::Registry(format!("duplicate tool name '{name}'")));
            }
            order.push(name);
        }
        Ok(ToolRegistry { tools, order })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolContext;
    use async_trait::async_trait;

    struct EchoTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "echoes its arguments"
        }

        fn parameters_schema(&self) -> Option<Value> {
            Some(json!({ "type": "object" }))
        }

        async fn execute(&self, _ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
            Ok(args)
        }
    }

    #[test]
    fn registry_lists_declarations_in_registration_order() {
        let registry = ToolRegistry::builder()
            .register(Arc::new(EchoTool { name: "beta" }))
            .register(Arc::new(EchoTool { name: "alpha" }))
            .build()
            .unwrap();

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["beta", "alpha"]);

        let decls = registry.declarations();
        assert_eq!(decls[0]["name"], "beta");
        assert_eq!(decls[1]["name"], "alpha");
        assert!(decls[0].get("parameters").is_some());
    }

    #[test]
    fn registry_rejects_duplicate_names() {
        let err = ToolRegistry::builder()
            .register(Arc::new(EchoTool { name: "echo" }))
            .register(Arc::new(EchoTool { name: "echo" }))
            .build()
            .unwrap_err();
        assert!(matches!(err, CoreError::Registry(_)));
    }

    #[tokio::test]
    async fn tools_execute_through_the_registry() {
        let registry =
            ToolRegistry::builder().register(Arc::new(EchoTool { name: "echo" })).build().unwrap();
        let ctx = Arc::new(crate::tool::SessionContext::new("s1", "u1"));
        let out =
            registry.get("echo").unwrap().execute(ctx, json!({ "hello": "world" })).await.unwrap();
        assert_eq!(out["hello"], "world");
    }

    #[test]
    fn registry_lookup() {
        let registry =
            ToolRegistry::builder().register(Arc::new(EchoTool { name: "echo" })).build().unwrap();
        assert!(registry.get("echo").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 1);
    }
}
