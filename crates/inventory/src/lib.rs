//! Inventory domain module.
//!
//! This crate contains business rules for the product list, implemented purely
//! as deterministic domain logic (no console, no IO).

pub mod analysis;
pub mod inventory;
pub mod money;
pub mod product;
pub mod search;

pub use analysis::{
    CategoryTotal, InventoryAnalysis, analyze, category_totals, low_stock, most_valuable,
    parse_threshold,
};
pub use inventory::{
    Inventory, InventoryCommand, InventoryEvent, PriceUpdated, QuantityUpdated, UpdatePrice,
    UpdateQuantity,
};
pub use money::Money;
pub use product::{Product, parse_quantity, seed_products};
pub use search::{SearchField, search};
