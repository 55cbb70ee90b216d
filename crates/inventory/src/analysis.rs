//! Value-by-category aggregation and low-stock filtering.

use serde::{Deserialize, Serialize};

use shelfkeep_core::DomainResult;

use crate::money::Money;
use crate::product::{Product, parse_non_negative};

/// Total stock value of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

/// Result of a single analysis pass over the inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryAnalysis {
    /// Per-category totals in first-seen category order.
    pub totals: Vec<CategoryTotal>,
}

impl InventoryAnalysis {
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn most_valuable(&self) -> Option<&CategoryTotal> {
        most_valuable(&self.totals)
    }

    pub fn grand_total(&self) -> Money {
        self.totals.iter().map(|t| &t.total).sum()
    }
}

/// Sum `quantity * unit_price` per category.
///
/// Categories are compared exactly (case-sensitive) and listed in the order
/// they first appear in `items`.
pub fn category_totals(items: &[Product]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for item in items {
        let value = item.line_value();
        match totals.iter_mut().find(|t| t.category == item.category()) {
            Some(entry) => entry.total = entry.total.saturating_add(value),
            None => totals.push(CategoryTotal {
                category: item.category().to_string(),
                total: value,
            }),
        }
    }

    totals
}

/// Category with the highest total; ties go to the one listed first.
pub fn most_valuable(totals: &[CategoryTotal]) -> Option<&CategoryTotal> {
    let mut best: Option<&CategoryTotal> = None;
    for entry in totals {
        match best {
            Some(current) if entry.total <= current.total => {}
            _ => best = Some(entry),
        }
    }
    best
}

pub fn analyze(items: &[Product]) -> InventoryAnalysis {
    InventoryAnalysis {
        totals: category_totals(items),
    }
}

/// Items with `quantity < threshold`, in inventory order.
pub fn low_stock(items: &[Product], threshold: u64) -> Vec<&Product> {
    items.iter().filter(|p| p.quantity() < threshold).collect()
}

/// Parse the low-stock threshold typed by the user.
pub fn parse_threshold(input: &str) -> DomainResult<u64> {
    parse_non_negative(input, "Threshold must be a non-negative number.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::seed_products;
    use shelfkeep_core::DomainError;

    fn total_of<'a>(totals: &'a [CategoryTotal], category: &str) -> Option<&'a Money> {
        totals.iter().find(|t| t.category == category).map(|t| &t.total)
    }

    #[test]
    fn seeded_totals_per_category() {
        let totals = category_totals(&seed_products());

        let categories: Vec<_> = totals.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(categories, vec!["Clothing", "Footwear", "Electronics"]);

        assert_eq!(total_of(&totals, "Clothing"), Some(&Money::from_major(60_500)));
        assert_eq!(total_of(&totals, "Footwear"), Some(&Money::from_major(37_500)));
        assert_eq!(total_of(&totals, "Electronics"), Some(&Money::from_major(300_000)));
    }

    #[test]
    fn clothing_total_displays_with_two_decimals() {
        let totals = category_totals(&seed_products());
        assert_eq!(total_of(&totals, "Clothing").unwrap().to_string(), "60500.00");
    }

    #[test]
    fn seeded_most_valuable_is_electronics() {
        let analysis = analyze(&seed_products());
        let best = analysis.most_valuable().unwrap();
        assert_eq!(best.category, "Electronics");
        assert_eq!(best.total, Money::from_major(300_000));
    }

    #[test]
    fn most_valuable_tie_goes_to_first_seen() {
        let items = vec![
            Product::new("A", 1, Money::from_major(100), "Toys"),
            Product::new("B", 2, Money::from_major(50), "Books"),
        ];
        let totals = category_totals(&items);
        assert_eq!(most_valuable(&totals).unwrap().category, "Toys");
    }

    #[test]
    fn categories_are_case_sensitive() {
        let items = vec![
            Product::new("A", 1, Money::from_major(1), "toys"),
            Product::new("B", 1, Money::from_major(1), "Toys"),
        ];
        assert_eq!(category_totals(&items).len(), 2);
    }

    #[test]
    fn empty_inventory_has_no_most_valuable() {
        let analysis = analyze(&[]);
        assert!(analysis.is_empty());
        assert!(analysis.most_valuable().is_none());
        assert_eq!(analysis.grand_total(), Money::ZERO);
    }

    #[test]
    fn low_stock_threshold_twenty_on_seed() {
        let items = seed_products();
        let low: Vec<_> = low_stock(&items, 20)
            .into_iter()
            .map(|p| (p.name(), p.quantity()))
            .collect();
        // Sneakers sits exactly at 20 and is not below it.
        assert_eq!(low, vec![("Smartphone", 10), ("Keds", 15)]);
    }

    #[test]
    fn low_stock_threshold_zero_is_empty() {
        assert!(low_stock(&seed_products(), 0).is_empty());
    }

    #[test]
    fn parse_threshold_rejects_negative() {
        assert_eq!(
            parse_threshold("-3").unwrap_err(),
            DomainError::validation("Threshold must be a non-negative number.")
        );
        assert_eq!(parse_threshold("20").unwrap(), 20);
    }

    #[test]
    fn large_thresholds_are_accepted_and_signs_checked_first() {
        assert_eq!(parse_threshold("5000000000").unwrap(), 5_000_000_000);
        assert_eq!(
            parse_threshold("-99999999999999999999").unwrap_err(),
            DomainError::validation("Threshold must be a non-negative number.")
        );
        assert_eq!(low_stock(&seed_products(), 5_000_000_000).len(), 7);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn product() -> impl Strategy<Value = Product> {
            (
                "[A-Za-z]{1,10}",
                0u64..1_000,
                0u64..10_000_000,
                prop::sample::select(vec!["Clothing", "Footwear", "Electronics", "Toys"]),
            )
                .prop_map(|(name, quantity, minor, category)| {
                    Product::new(name, quantity, Money::from_minor(minor), category)
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: category totals add up to the sum of every line value.
            #[test]
            fn totals_conserve_value(items in prop::collection::vec(product(), 0..30)) {
                let analysis = analyze(&items);
                let lines: u64 = items.iter().map(|p| p.line_value().minor_units()).sum();
                prop_assert_eq!(analysis.grand_total().minor_units(), lines);
            }

            /// Property: the most valuable category is at least as large as every other.
            #[test]
            fn most_valuable_dominates(items in prop::collection::vec(product(), 1..30)) {
                let totals = category_totals(&items);
                let best = most_valuable(&totals).unwrap();
                for entry in &totals {
                    prop_assert!(entry.total <= best.total);
                }
            }

            /// Property: low stock returns exactly the items strictly below the threshold.
            #[test]
            fn low_stock_is_strict(
                items in prop::collection::vec(product(), 0..30),
                threshold in 0u64..1_200
            ) {
                let low = low_stock(&items, threshold);
                let expected = items.iter().filter(|p| p.quantity() < threshold).count();
                prop_assert_eq!(low.len(), expected);
                prop_assert!(low.iter().all(|p| p.quantity() < threshold));
            }
        }
    }
}
