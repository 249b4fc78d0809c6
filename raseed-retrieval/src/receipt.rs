//! Receipt data model: line items, categories, and the stored record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RetrievalError, Result};

/// The fixed category set line items are tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Groceries,
    Household,
    Vegetables,
    Drinks,
    Snacks,
    Health,
    PersonalCare,
    Food,
    Other,
}

impl Category {
    /// The snake_case name used in tool schemas and stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "groceries",
            Category::Household => "household",
            Category::Vegetables => "vegetables",
            Category::Drinks => "drinks",
            Category::Snacks => "snacks",
            Category::Health => "health",
            Category::PersonalCare => "personal_care",
            Category::Food => "food",
            Category::Other => "other",
        }
    }

    /// All categories, for schema enumeration.
    pub fn all() -> &'static [Category] {
        &[
            Category::Groceries,
            Category::Household,
            Category::Vegetables,
            Category::Drinks,
            Category::Snacks,
            Category::Health,
            Category::PersonalCare,
            Category::Food,
            Category::Other,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RetrievalError;

    fn from_str(s: &str) -> Result<Self> {
        Category::all()
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| RetrievalError::Validation(format!("unknown category '{s}'")))
    }
}

/// A single purchased item on a receipt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// The item name as printed on the receipt.
    pub name: String,
    /// The category this item is tagged with.
    pub category: Category,
    /// Unit price.
    pub price: f64,
    /// Quantity purchased.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    /// The line total (`price × quantity`).
    pub fn amount(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A stored receipt record with its embedding attached.
///
/// Immutable once stored; never deleted in normal operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receipt {
    /// Unique identifier, generated on ingestion.
    pub id: String,
    /// The merchant name.
    pub merchant: String,
    /// When the purchase happened.
    pub timestamp: DateTime<Utc>,
    /// The purchased items.
    pub items: Vec<LineItem>,
    /// The receipt total.
    pub total: f64,
    /// The raw receipt text, when available.
    pub raw_text: String,
    /// The embedding of [`search_text`](Receipt::search_text).
    /// Its length must match the configured embedding dimension.
    pub embedding: Vec<f32>,
}

impl Receipt {
    /// Render the receipt into the flat text that gets embedded for
    /// semantic search: merchant, date, and each item with its category
    /// and line total.
    pub fn search_text(&self) -> String {
        let items = self
            .items
            .iter()
            .map(|item| format!("{} [{}] {:.2}", item.name, item.category, item.amount()))
            .collect::<Vec<_>>()
            .join(", ");

        let mut text = format!(
            "Receipt from {} on {}. Items: {items}. Total: {:.2}",
            self.merchant,
            self.timestamp.format("%Y-%m-%d"),
            self.total,
        );
        if !self.raw_text.is_empty() {
            text.push_str(". ");
            text.push_str(&self.raw_text);
        }
        text
    }

    /// Sum of spend per category across all items.
    pub fn category_summary(&self) -> Vec<(Category, f64)> {
        let mut summary: Vec<(Category, f64)> = Vec::new();
        for item in &self.items {
            match summary.iter_mut().find(|(c, _)| *c == item.category) {
                Some((_, amount)) => *amount += item.amount(),
                None => summary.push((item.category, item.amount())),
            }
        }
        summary
    }
}

/// The caller-supplied fields of a receipt: everything except the
/// generated `id` and the computed `embedding`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReceipt {
    /// The merchant name. Required, non-empty.
    pub merchant: String,
    /// When the purchase happened.
    pub timestamp: DateTime<Utc>,
    /// The purchased items. Required, non-empty.
    pub items: Vec<LineItem>,
    /// The receipt total. Computed from the items when absent.
    #[serde(default)]
    pub total: Option<f64>,
    /// Raw receipt text, when available.
    #[serde(default)]
    pub raw_text: String,
}

impl NewReceipt {
    /// Validate the record before ingestion.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Validation`] when the merchant is empty,
    /// no items are present, or any price is negative.
    pub fn validate(&self) -> Result<()> {
        if self.merchant.trim().is_empty() {
            return Err(RetrievalError::Validation("merchant must not be empty".into()));
        }
        if self.items.is_empty() {
            return Err(RetrievalError::Validation("receipt must have at least one item".into()));
        }
        for item in &self.items {
            if item.name.trim().is_empty() {
                return Err(RetrievalError::Validation("item name must not be empty".into()));
            }
            if item.price < 0.0 {
                return Err(RetrievalError::Validation(format!(
                    "item '{}' has a negative price",
                    item.name
                )));
            }
        }
        if let Some(total) = self.total {
            if total < 0.0 {
                return Err(RetrievalError::Validation("total must not be negative".into()));
            }
        }
        Ok(())
    }

    /// The receipt total: the supplied value, or the sum of line totals.
    pub fn total_amount(&self) -> f64 {
        self.total.unwrap_or_else(|| self.items.iter().map(LineItem::amount).sum())
    }

    /// Materialize a [`Receipt`] with the given id and embedding.
    pub(crate) fn into_receipt(self, id: String, embedding: Vec<f32>) -> Receipt {
        let total = self.total_amount();
        Receipt {
            id,
            merchant: self.merchant,
            timestamp: self.timestamp,
            items: self.items,
            total,
            raw_text: self.raw_text,
            embedding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_receipt() -> NewReceipt {
        NewReceipt {
            merchant: "Big Bazaar".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 10, 45, 0).unwrap(),
            items: vec![
                LineItem {
                    name: "Milk".into(),
                    category: Category::Groceries,
                    price: 60.0,
                    quantity: 2,
                },
                LineItem {
                    name: "Detergent".into(),
                    category: Category::Household,
                    price: 75.5,
                    quantity: 1,
                },
            ],
            total: None,
            raw_text: String::new(),
        }
    }

    #[test]
    fn total_is_computed_from_line_items_when_absent() {
        assert!((new_receipt().total_amount() - 195.5).abs() < 1e-9);
    }

    #[test]
    fn supplied_total_wins() {
        let mut r = new_receipt();
        r.total = Some(200.0);
        assert_eq!(r.total_amount(), 200.0);
    }

    #[test]
    fn validation_rejects_empty_merchant_and_empty_items() {
        let mut r = new_receipt();
        r.merchant = "  ".into();
        assert!(matches!(r.validate(), Err(RetrievalError::Validation(_))));

        let mut r = new_receipt();
        r.items.clear();
        assert!(matches!(r.validate(), Err(RetrievalError::Validation(_))));
    }

    #[test]
    fn validation_rejects_negative_price() {
        let mut r = new_receipt();
        r.items[0].price = -1.0;
        assert!(matches!(r.validate(), Err(RetrievalError::Validation(_))));
    }

    #[test]
    fn search_text_mentions_merchant_items_and_categories() {
        let receipt = new_receipt().into_receipt("r1".into(), vec![]);
        let text = receipt.search_text();
        assert!(text.contains("Big Bazaar"));
        assert!(text.contains("Milk"));
        assert!(text.contains("groceries"));
        assert!(text.contains("2024-01-15"));
    }

    #[test]
    fn category_summary_groups_by_category() {
        let receipt = new_receipt().into_receipt("r1".into(), vec![]);
        let summary = receipt.category_summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].0, Category::Groceries);
        assert!((summary[0].1 - 120.0).abs() < 1e-9);
    }

    #[test]
    fn category_round_trips_through_from_str() {
        for category in Category::all() {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), *category);
        }
        assert!("gadgets".parse::<Category>().is_err());
    }
}
