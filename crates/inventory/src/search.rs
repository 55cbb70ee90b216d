use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Which product field a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Category,
}

impl SearchField {
    /// Menu letter: `n` for name, `c` for category (any case).
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "n" => Some(SearchField::Name),
            "c" => Some(SearchField::Category),
            _ => None,
        }
    }

    fn value_of<'a>(&self, product: &'a Product) -> &'a str {
        match self {
            SearchField::Name => product.name(),
            SearchField::Category => product.category(),
        }
    }
}

/// Case-insensitive substring search over `field`.
///
/// Returns every match in inventory order. No match is an empty vec, not an
/// error; an empty term matches everything.
pub fn search<'a>(items: &'a [Product], term: &str, field: SearchField) -> Vec<&'a Product> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|p| field.value_of(p).to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::seed_products;

    fn names(found: &[&Product]) -> Vec<String> {
        found.iter().map(|p| p.name().to_string()).collect()
    }

    #[test]
    fn name_search_is_case_insensitive_substring() {
        let items = seed_products();
        assert_eq!(
            names(&search(&items, "shirt", SearchField::Name)),
            vec!["T-Shirt", "Sweatshirt"]
        );
        assert_eq!(
            names(&search(&items, "SHIRT", SearchField::Name)),
            vec!["T-Shirt", "Sweatshirt"]
        );
    }

    #[test]
    fn category_search_matches_partial_category() {
        let items = seed_products();
        assert_eq!(
            names(&search(&items, "foot", SearchField::Category)),
            vec!["Sneakers", "Keds"]
        );
    }

    #[test]
    fn name_search_does_not_look_at_category() {
        let items = seed_products();
        assert!(search(&items, "clothing", SearchField::Name).is_empty());
    }

    #[test]
    fn no_match_is_empty_result() {
        let items = seed_products();
        assert!(search(&items, "laptop", SearchField::Name).is_empty());
    }

    #[test]
    fn empty_term_matches_everything() {
        let items = seed_products();
        assert_eq!(search(&items, "", SearchField::Category).len(), items.len());
    }

    #[test]
    fn from_choice_accepts_both_cases() {
        assert_eq!(SearchField::from_choice("n"), Some(SearchField::Name));
        assert_eq!(SearchField::from_choice("C"), Some(SearchField::Category));
        assert_eq!(SearchField::from_choice("x"), None);
        assert_eq!(SearchField::from_choice(""), None);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 300,
                ..ProptestConfig::default()
            })]

            /// Property: changing the case of the term never changes the result.
            #[test]
            fn search_ignores_term_case(term in "[A-Za-z-]{0,6}") {
                let items = seed_products();
                for field in [SearchField::Name, SearchField::Category] {
                    let lower = names(&search(&items, &term.to_lowercase(), field));
                    let upper = names(&search(&items, &term.to_uppercase(), field));
                    prop_assert_eq!(lower, upper);
                }
            }

            /// Property: results are a subsequence of the inventory, in order.
            #[test]
            fn results_preserve_inventory_order(term in "[a-z]{0,3}") {
                let items = seed_products();
                let found = search(&items, &term, SearchField::Name);
                let mut cursor = items.iter();
                for hit in found {
                    prop_assert!(cursor.any(|p| std::ptr::eq(p, hit)));
                }
            }
        }
    }
}
