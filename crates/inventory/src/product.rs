use serde::{Deserialize, Serialize};

use shelfkeep_core::{DomainError, DomainResult};

use crate::money::Money;

/// A stocked product.
///
/// The name is the only identity a product has. Uniqueness is a convention
/// of the data, not enforced here; lookups take the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    quantity: u64,
    unit_price: Money,
    category: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        quantity: u64,
        unit_price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            category: category.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// `quantity * unit_price`.
    pub fn line_value(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    /// Case-insensitive exact comparison against the product name.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    pub(crate) fn set_quantity(&mut self, quantity: u64) {
        self.quantity = quantity;
    }

    pub(crate) fn set_unit_price(&mut self, unit_price: Money) {
        self.unit_price = unit_price;
    }
}

/// The seven records the program starts with.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new("T-Shirt", 50, Money::from_major(250), "Clothing"),
        Product::new("Jeans", 30, Money::from_major(800), "Clothing"),
        Product::new("Sneakers", 20, Money::from_major(1_200), "Footwear"),
        Product::new("Sweatshirt", 40, Money::from_major(600), "Clothing"),
        Product::new("Smartphone", 10, Money::from_major(25_000), "Electronics"),
        Product::new("Headphones", 25, Money::from_major(2_000), "Electronics"),
        Product::new("Keds", 15, Money::from_major(900), "Footwear"),
    ]
}

/// Parse a new stock quantity typed by the user.
pub fn parse_quantity(input: &str) -> DomainResult<u64> {
    parse_non_negative(input, "Quantity cannot be negative.")
}

/// Parse a non-negative integer, reporting `negative` for values below zero.
///
/// The sign is handled before the magnitude is converted, so a negative
/// number of any length gets the `negative` message and `-0` is zero.
pub(crate) fn parse_non_negative(input: &str, negative: &str) -> DomainResult<u64> {
    let raw = input.trim();
    let invalid = || DomainError::validation(format!("invalid number: '{raw}'"));
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if let Some(magnitude) = raw.strip_prefix('-') {
        if !is_digits(magnitude) {
            return Err(invalid());
        }
        if magnitude.bytes().any(|b| b != b'0') {
            return Err(DomainError::validation(negative));
        }
        return Ok(0);
    }

    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if !is_digits(digits) {
        return Err(invalid());
    }
    digits
        .parse()
        .map_err(|_| DomainError::validation(format!("number is too large: '{raw}'")))
}
