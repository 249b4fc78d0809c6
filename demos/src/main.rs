//! # Seed-and-query demo
//!
//! Exercises the full tool surface with **zero API keys**: seeds the
//! sample receipt corpus through the router, then drives the three tools
//! the way an agent runtime would — structured query, ingestion, and
//! semantic search.
//!
//! Uses a deterministic hash-based embedder and the in-memory store.
//!
//! Run: `cargo run -p raseed-demos --bin seed_and_query`

use std::sync::Arc;

use raseed_core::SessionContext;
use raseed_retrieval::{
    EmbeddingProvider, InMemoryDocumentStore, RetrievalRouter, RouterConfig, sample, toolset,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// MockEmbeddingProvider — deterministic hash-based embeddings for demos
// ---------------------------------------------------------------------------

struct MockEmbeddingProvider {
    dimensions: usize,
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> raseed_retrieval::Result<Vec<f32>> {
        // Deterministic embedding: hash the text bytes, then generate a
        // normalised vector whose direction depends on the content.
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; self.dimensions];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        // L2-normalise so cosine similarity is just the dot product.
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            emb.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(emb)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing_subscriber::filter::LevelFilter::INFO).init();

    // -- 1. Build the router with in-memory components ---------------------
    let embedder = Arc::new(MockEmbeddingProvider { dimensions: 64 });
    let router = Arc::new(
        RetrievalRouter::builder()
            .config(RouterConfig::default())
            .store(Arc::new(InMemoryDocumentStore::new(embedder.dimensions())))
            .embedder(embedder)
            .build()?,
    );

    // -- 2. Seed the sample corpus -----------------------------------------
    let seeded = sample::seed_samples(&router).await?;
    println!("Seeded {seeded} sample receipts.");

    // -- 3. Build the fixed tool registry ----------------------------------
    let registry = toolset(router)?;
    println!("\nDeclared tools:");
    for decl in registry.declarations() {
        println!("  {} — {}", decl["name"].as_str().unwrap(), decl["description"].as_str().unwrap());
    }

    let ctx = Arc::new(SessionContext::new("demo-session", "user_001"));

    // -- 4. Structured query: what did I buy last week? --------------------
    let out = registry
        .get("query_receipts")
        .expect("registered")
        .execute(ctx.clone(), json!({ "time_range": "last week" }))
        .await?;
    println!("\nReceipts from the last week:");
    for receipt in out["receipts"].as_array().unwrap() {
        println!(
            "  {} on {} — total {:.2}",
            receipt["merchant"].as_str().unwrap(),
            receipt["timestamp"].as_str().unwrap(),
            receipt["total"].as_f64().unwrap(),
        );
    }

    // -- 5. Add a new receipt ----------------------------------------------
    let added = registry
        .get("add_receipt")
        .expect("registered")
        .execute(
            ctx.clone(),
            json!({
                "merchant": "Corner Store",
                "items": [
                    { "name": "Orange Juice", "category": "drinks", "price": 50.0 },
                    { "name": "Apples", "category": "groceries", "price": 100.0 }
                ]
            }),
        )
        .await?;
    println!("\nAdded receipt: {}", added["receipt_id"].as_str().unwrap());

    // -- 6. Semantic search -------------------------------------------------
    let queries = ["milk and bread", "pharmacy vitamins", "coffee"];
    for query in queries {
        let results = registry
            .get("semantic_search")
            .expect("registered")
            .execute(ctx.clone(), json!({ "query": query, "top_k": 3 }))
            .await?;
        println!("\nQuery: \"{query}\"");
        for (i, hit) in results.as_array().unwrap().iter().enumerate() {
            let text = hit["text"].as_str().unwrap();
            println!(
                "  {}. [score={:.4}] {}",
                i + 1,
                hit["score"].as_f64().unwrap(),
                &text[..text.len().min(72)],
            );
        }
    }

    println!("\nDone.");
    Ok(())
}
