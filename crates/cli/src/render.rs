//! Console rendering of tables and reports.

use std::io::{self, Write};

use shelfkeep_inventory::{InventoryAnalysis, Product};

pub const EMPTY_NOTICE: &str = "Inventory is empty.";

const RULE_WIDTH: usize = 60;

pub fn menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Menu ---")?;
    writeln!(out, "1. View Inventory")?;
    writeln!(out, "2. Search Product")?;
    writeln!(out, "3. Update Product")?;
    writeln!(out, "4. Analyze Inventory")?;
    writeln!(out, "5. Exit")
}

/// Product table, or the empty notice when there is nothing to show.
pub fn inventory_table<'a>(
    out: &mut impl Write,
    items: impl IntoIterator<Item = &'a Product>,
) -> io::Result<()> {
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return writeln!(out, "{EMPTY_NOTICE}");
    }

    writeln!(out)?;
    writeln!(out, "--- Product Inventory ---")?;
    writeln!(
        out,
        "{:<20} {:<10} {:<15} {:<15}",
        "Product Name", "Quantity", "Price per Unit", "Category"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for item in items {
        writeln!(
            out,
            "{:<20} {:<10} {:<15} {:<15}",
            item.name(),
            item.quantity(),
            item.unit_price().to_string(),
            item.category()
        )?;
    }
    Ok(())
}

/// Per-category totals followed by the most valuable category.
pub fn analysis_report(
    out: &mut impl Write,
    analysis: &InventoryAnalysis,
    currency: &str,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Inventory Analysis ---")?;
    writeln!(out, "Total value of products by category:")?;
    for entry in &analysis.totals {
        writeln!(out, "{}: {} {currency}", entry.category, entry.total)?;
    }

    if let Some(best) = analysis.most_valuable() {
        writeln!(out)?;
        writeln!(
            out,
            "Category with the highest total value: {} ({} {currency})",
            best.category, best.total
        )?;
    }
    Ok(())
}

pub fn low_stock_report(out: &mut impl Write, threshold: u64, low: &[&Product]) -> io::Result<()> {
    writeln!(out)?;
    if low.is_empty() {
        return writeln!(
            out,
            "All products have sufficient quantity (more than {threshold} pcs)."
        );
    }

    writeln!(out, "Products with quantity below {threshold}:")?;
    for item in low {
        writeln!(out, "{} ({} pcs)", item.name(), item.quantity())?;
    }
    Ok(())
}
