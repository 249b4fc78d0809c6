//! Conjunctive query filters over stored receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::receipt::{Category, Receipt};

/// A set of optional constraints over receipts.
///
/// Constraints combine with logical AND; an empty filter matches every
/// record. Date bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReceiptFilter {
    /// Inclusive lower bound on the purchase timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the purchase timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
    /// Case-insensitive exact merchant match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    /// Match receipts with at least one item in this category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Case-insensitive substring match over merchant, item names, and
    /// raw text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl ReceiptFilter {
    /// A filter with no constraints, matching all records.
    pub fn any() -> Self {
        Self::default()
    }

    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.since.is_none()
            && self.until.is_none()
            && self.merchant.is_none()
            && self.category.is_none()
            && self.keyword.is_none()
    }

    /// Whether the receipt satisfies every constraint in this filter.
    pub fn matches(&self, receipt: &Receipt) -> bool {
        if let Some(since) = self.since {
            if receipt.timestamp < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if receipt.timestamp > until {
                return false;
            }
        }
        if let Some(merchant) = &self.merchant {
            if !receipt.merchant.eq_ignore_ascii_case(merchant) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if !receipt.items.iter().any(|item| item.category == category) {
                return false;
            }
        }
        if let Some(keyword) = &self.keyword {
            let needle = keyword.to_lowercase();
            let in_merchant = receipt.merchant.to_lowercase().contains(&needle);
            let in_items =
                receipt.items.iter().any(|item| item.name.to_lowercase().contains(&needle));
            let in_raw = receipt.raw_text.to_lowercase().contains(&needle);
            if !(in_merchant || in_items || in_raw) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::LineItem;
    use chrono::TimeZone;

    fn receipt(merchant: &str, day: u32, category: Category, item: &str) -> Receipt {
        Receipt {
            id: format!("r-{day}"),
            merchant: merchant.into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
            items: vec![LineItem { name: item.into(), category, price: 10.0, quantity: 1 }],
            total: 10.0,
            raw_text: String::new(),
            embedding: vec![],
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ReceiptFilter::any();
        assert!(filter.is_empty());
        assert!(filter.matches(&receipt("Big Bazaar", 5, Category::Groceries, "Milk")));
    }

    #[test]
    fn merchant_match_is_case_insensitive_exact() {
        let filter = ReceiptFilter { merchant: Some("big bazaar".into()), ..Default::default() };
        assert!(filter.matches(&receipt("Big Bazaar", 5, Category::Groceries, "Milk")));
        assert!(!filter.matches(&receipt("Big Bazaar Express", 5, Category::Groceries, "Milk")));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let filter = ReceiptFilter {
            since: Some(Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap()),
            until: Some(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(filter.matches(&receipt("A", 5, Category::Groceries, "Milk")));
        assert!(filter.matches(&receipt("A", 10, Category::Groceries, "Milk")));
        assert!(!filter.matches(&receipt("A", 4, Category::Groceries, "Milk")));
        assert!(!filter.matches(&receipt("A", 11, Category::Groceries, "Milk")));
    }

    #[test]
    fn constraints_combine_with_and() {
        let filter = ReceiptFilter {
            merchant: Some("Big Bazaar".into()),
            category: Some(Category::Household),
            ..Default::default()
        };
        // Right merchant, wrong category.
        assert!(!filter.matches(&receipt("Big Bazaar", 5, Category::Groceries, "Milk")));
        assert!(filter.matches(&receipt("Big Bazaar", 5, Category::Household, "Detergent")));
    }

    #[test]
    fn keyword_searches_merchant_items_and_raw_text() {
        let filter = ReceiptFilter { keyword: Some("milk".into()), ..Default::default() };
        assert!(filter.matches(&receipt("A", 5, Category::Groceries, "Milk")));
        assert!(filter.matches(&receipt("Milk Depot", 5, Category::Groceries, "Bread")));
        assert!(!filter.matches(&receipt("A", 5, Category::Groceries, "Bread")));

        let mut with_raw = receipt("A", 5, Category::Groceries, "Bread");
        with_raw.raw_text = "2x MILK 60.00".into();
        assert!(filter.matches(&with_raw));
    }
}
