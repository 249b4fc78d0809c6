//! Tool adapters exposing the retrieval router to agent runtimes.
//!
//! Each adapter wraps one [`RetrievalRouter`] operation in a fixed
//! declarative schema so an external LLM agent can invoke it without
//! knowledge of the underlying store. Pure adaptation: no business logic,
//! read operations are idempotent, and router errors surface unchanged in
//! the error message.
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = toolset(Arc::new(router))?;
//! let tool = registry.get("semantic_search").unwrap();
//! let results = tool.execute(ctx, json!({ "query": "milk", "top_k": 3 })).await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use raseed_core::{CoreError, Tool, ToolContext, ToolRegistry};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::filter::ReceiptFilter;
use crate::receipt::{Category, LineItem, NewReceipt};
use crate::router::RetrievalRouter;
use crate::timeframe::parse_timeframe;

fn bad_args(message: impl Into<String>) -> CoreError {
    CoreError::Tool(message.into())
}

fn parse_args<T: for<'de> Deserialize<'de>>(args: Value) -> raseed_core::Result<T> {
    serde_json::from_value(args).map_err(|e| bad_args(format!("invalid arguments: {e}")))
}

/// Build the fixed tool registry over one shared router.
///
/// Called once at startup; the registry is immutable thereafter.
pub fn toolset(router: Arc<RetrievalRouter>) -> raseed_core::Result<ToolRegistry> {
    ToolRegistry::builder()
        .register(Arc::new(QueryReceiptsTool::new(router.clone())))
        .register(Arc::new(AddReceiptTool::new(router.clone())))
        .register(Arc::new(SemanticSearchTool::new(router)))
        .build()
}

// ── query_receipts ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct QueryReceiptsArgs {
    #[serde(default)]
    merchant: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    keyword: Option<String>,
    /// Natural phrase like "last week"; parsed relative to now.
    #[serde(default)]
    time_range: Option<String>,
    /// RFC 3339 lower bound; overrides `time_range` when present.
    #[serde(default)]
    since: Option<DateTime<Utc>>,
    /// RFC 3339 upper bound; overrides `time_range` when present.
    #[serde(default)]
    until: Option<DateTime<Utc>>,
}

/// Structured receipt queries by date range, merchant, category, or keyword.
pub struct QueryReceiptsTool {
    router: Arc<RetrievalRouter>,
}

impl QueryReceiptsTool {
    /// Create the tool over a shared router.
    pub fn new(router: Arc<RetrievalRouter>) -> Self {
        Self { router }
    }

    fn build_filter(args: QueryReceiptsArgs, now: DateTime<Utc>) -> raseed_core::Result<ReceiptFilter> {
        let category = args
            .category
            .as_deref()
            .map(|c| c.parse::<Category>())
            .transpose()
            .map_err(|e| bad_args(e.to_string()))?;

        let mut filter = ReceiptFilter {
            since: args.since,
            until: args.until,
            merchant: args.merchant,
            category,
            keyword: args.keyword,
        };

        if let Some(phrase) = args.time_range.as_deref() {
            if filter.since.is_none() && filter.until.is_none() {
                match parse_timeframe(phrase, now) {
                    Some((start, end)) => {
                        filter.since = Some(start);
                        filter.until = Some(end);
                    }
                    None => {
                        return Err(bad_args(format!("unrecognized time range '{phrase}'")));
                    }
                }
            }
        }

        Ok(filter)
    }
}

#[async_trait]
impl Tool for QueryReceiptsTool {
    fn name(&self) -> &str {
        "query_receipts"
    }

    fn description(&self) -> &str {
        "Query the user's receipt history by time period, merchant, category, or keyword"
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "merchant": {
                    "type": "string",
                    "description": "Exact merchant name, e.g. 'Big Bazaar'"
                },
                "category": {
                    "type": "string",
                    "enum": Category::all().iter().map(|c| c.as_str()).collect::<Vec<_>>(),
                    "description": "Restrict to receipts with at least one item in this category"
                },
                "keyword": {
                    "type": "string",
                    "description": "Free-text keyword matched against merchant, item names, and raw text"
                },
                "time_range": {
                    "type": "string",
                    "description": "Natural phrase: 'today', 'yesterday', 'last week', 'last two weeks', or 'last month'"
                },
                "since": {
                    "type": "string",
                    "description": "RFC 3339 inclusive lower bound on the purchase timestamp"
                },
                "until": {
                    "type": "string",
                    "description": "RFC 3339 inclusive upper bound on the purchase timestamp"
                }
            }
        }))
    }

    fn response_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "receipts": { "type": "array" },
                "no_matches": { "type": "boolean" }
            }
        }))
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> raseed_core::Result<Value> {
        let args: QueryReceiptsArgs = parse_args(args)?;
        let filter = Self::build_filter(args, Utc::now())?;

        info!(user_id = ctx.user_id(), "query_receipts tool called");

        let matches = self.router.query_receipts(&filter).await.map_err(|e| {
            error!(error = %e, "query_receipts failed");
            CoreError::Tool(e.to_string())
        })?;

        serde_json::to_value(&matches)
            .map_err(|e| CoreError::Tool(format!("failed to serialize results: {e}")))
    }
}

// ── add_receipt ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AddReceiptArgs {
    merchant: String,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    items: Vec<LineItem>,
    #[serde(default)]
    total: Option<f64>,
    #[serde(default)]
    raw_text: Option<String>,
}

/// Adds a new receipt to the user's transaction history.
pub struct AddReceiptTool {
    router: Arc<RetrievalRouter>,
}

impl AddReceiptTool {
    /// Create the tool over a shared router.
    pub fn new(router: Arc<RetrievalRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Tool for AddReceiptTool {
    fn name(&self) -> &str {
        "add_receipt"
    }

    fn description(&self) -> &str {
        "Add a new receipt to the user's transaction history"
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "merchant": {
                    "type": "string",
                    "description": "The merchant name"
                },
                "timestamp": {
                    "type": "string",
                    "description": "RFC 3339 purchase time; defaults to now"
                },
                "items": {
                    "type": "array",
                    "description": "Purchased items",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "category": {
                                "type": "string",
                                "enum": Category::all().iter().map(|c| c.as_str()).collect::<Vec<_>>()
                            },
                            "price": { "type": "number" },
                            "quantity": { "type": "integer" }
                        },
                        "required": ["name", "category", "price"]
                    }
                },
                "total": {
                    "type": "number",
                    "description": "Receipt total; computed from the items when omitted"
                },
                "raw_text": {
                    "type": "string",
                    "description": "Raw receipt text, when available"
                }
            },
            "required": ["merchant", "items"]
        }))
    }

    fn response_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": { "receipt_id": { "type": "string" } }
        }))
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> raseed_core::Result<Value> {
        let args: AddReceiptArgs = parse_args(args)?;

        let record = NewReceipt {
            merchant: args.merchant,
            timestamp: args.timestamp.unwrap_or_else(Utc::now),
            items: args.items,
            total: args.total,
            raw_text: args.raw_text.unwrap_or_default(),
        };

        info!(user_id = ctx.user_id(), merchant = %record.merchant, "add_receipt tool called");

        let id = self.router.add_receipt(record).await.map_err(|e| {
            error!(error = %e, "add_receipt failed");
            CoreError::Tool(e.to_string())
        })?;

        Ok(json!({ "receipt_id": id }))
    }
}

// ── semantic_search ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SemanticSearchArgs {
    query: String,
    #[serde(default)]
    top_k: Option<usize>,
}

/// Semantic search across stored receipts and documents.
pub struct SemanticSearchTool {
    router: Arc<RetrievalRouter>,
}

impl SemanticSearchTool {
    /// Create the tool over a shared router.
    pub fn new(router: Arc<RetrievalRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Tool for SemanticSearchTool {
    fn name(&self) -> &str {
        "semantic_search"
    }

    fn description(&self) -> &str {
        "Semantic search across all stored documents and receipts for general questions"
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "top_k": {
                    "type": "integer",
                    "description": "Maximum number of results; uses the configured default when omitted"
                }
            },
            "required": ["query"]
        }))
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> raseed_core::Result<Value> {
        let args: SemanticSearchArgs = parse_args(args)?;
        if args.query.trim().is_empty() {
            return Err(bad_args("'query' must not be empty"));
        }
        let top_k = args.top_k.unwrap_or(self.router.config().default_top_k);

        info!(user_id = ctx.user_id(), top_k, "semantic_search tool called");

        let results = self.router.semantic_search(&args.query, top_k).await.map_err(|e| {
            error!(error = %e, "semantic_search failed");
            CoreError::Tool(e.to_string())
        })?;

        let shaped: Vec<Value> = results
            .iter()
            .map(|r| {
                json!({
                    "id": r.document.id,
                    "text": r.document.text,
                    "metadata": r.document.metadata,
                    "score": r.score,
                })
            })
            .collect();

        Ok(Value::Array(shaped))
    }
}
