use anyhow::Context;

use shelfkeep_cli::{Config, Session};
use shelfkeep_inventory::Inventory;

fn main() -> anyhow::Result<()> {
    shelfkeep_observability::init();

    let config = Config::from_env();
    let inventory = Inventory::seeded();
    tracing::info!(items = inventory.len(), currency = %config.currency, "inventory seeded");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(inventory, config, stdin.lock(), stdout.lock());
    session.run().context("console session failed")?;

    Ok(())
}
