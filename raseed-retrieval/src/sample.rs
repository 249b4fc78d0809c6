//! Sample-data bootstrap for demos and first runs.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::error::Result;
use crate::filter::ReceiptFilter;
use crate::receipt::{Category, LineItem, NewReceipt};
use crate::router::RetrievalRouter;

fn item(name: &str, category: Category, price: f64) -> LineItem {
    LineItem { name: name.into(), category, price, quantity: 1 }
}

/// The seeded receipt corpus, dated relative to `now`.
pub fn sample_receipts(now: DateTime<Utc>) -> Vec<NewReceipt> {
    vec![
        NewReceipt {
            merchant: "Big Bazaar".into(),
            timestamp: now - Duration::days(2),
            items: vec![
                item("Milk", Category::Groceries, 60.0),
                item("Bread", Category::Groceries, 40.0),
                item("Rice", Category::Groceries, 500.0),
                item("Eggs", Category::Groceries, 120.0),
                item("Tomatoes", Category::Vegetables, 80.0),
                item("Onions", Category::Vegetables, 50.0),
                item("Dish Soap", Category::Household, 120.0),
            ],
            total: None,
            raw_text: String::new(),
        },
        NewReceipt {
            merchant: "Food Mart".into(),
            timestamp: now - Duration::days(5),
            items: vec![
                item("Chicken", Category::Groceries, 300.0),
                item("Pasta", Category::Groceries, 150.0),
                item("Chips", Category::Snacks, 80.0),
            ],
            total: None,
            raw_text: String::new(),
        },
        NewReceipt {
            merchant: "Local Pharmacy".into(),
            timestamp: now - Duration::days(10),
            items: vec![
                item("Vitamins", Category::Health, 200.0),
                item("Shampoo", Category::PersonalCare, 150.0),
            ],
            total: None,
            raw_text: String::new(),
        },
        NewReceipt {
            merchant: "Coffee Shop".into(),
            timestamp: now - Duration::days(1),
            items: vec![
                item("Latte", Category::Food, 120.0),
                item("Sandwich", Category::Food, 60.0),
            ],
            total: None,
            raw_text: String::new(),
        },
    ]
}

/// Ingest the sample corpus unless the store already has receipts.
///
/// Idempotent: safe to call on every startup. Returns the number of
/// receipts ingested (zero when data already exists).
pub async fn seed_samples(router: &RetrievalRouter) -> Result<usize> {
    let existing = router.query_receipts(&ReceiptFilter::any()).await?;
    if !existing.no_matches {
        info!("sample receipt data already exists, skipping initialization");
        return Ok(0);
    }

    let receipts = sample_receipts(Utc::now());
    let count = receipts.len();
    for receipt in receipts {
        router.add_receipt(receipt).await?;
    }
    info!(count, "initialized sample receipts");
    Ok(count)
}
