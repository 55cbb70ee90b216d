use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfkeep_core::{Aggregate, AggregateRoot, DomainError};
use shelfkeep_events::{Event, EventEnvelope};

use crate::money::Money;
use crate::product::{Product, seed_products};
use crate::search::{SearchField, search};

const AGGREGATE_TYPE: &str = "inventory";

/// Aggregate root: the in-memory product list.
///
/// Every update goes through `handle`/`apply`; applied events are kept in an
/// append-only history for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<Product>,
    history: Vec<EventEnvelope<InventoryEvent>>,
    version: u64,
}

impl Inventory {
    pub fn new(items: Vec<Product>) -> Self {
        Self {
            items,
            history: Vec::new(),
            version: 0,
        }
    }

    /// Inventory with the startup seed records.
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Events applied so far, oldest first.
    pub fn history(&self) -> &[EventEnvelope<InventoryEvent>] {
        &self.history
    }

    /// First product whose name equals `name`, ignoring case.
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.position(name).map(|idx| &self.items[idx])
    }

    pub fn search(&self, term: &str, field: SearchField) -> Vec<&Product> {
        search(&self.items, term, field)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|p| p.is_named(name))
    }
}

impl AggregateRoot for Inventory {
    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: UpdateQuantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuantity {
    pub name: String,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdatePrice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePrice {
    pub name: String,
    pub unit_price: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    UpdateQuantity(UpdateQuantity),
    UpdatePrice(UpdatePrice),
}

/// Event: QuantityUpdated.
///
/// `name` is the product's stored name, not the text the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdated {
    pub name: String,
    pub previous: u64,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PriceUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdated {
    pub name: String,
    pub previous: Money,
    pub unit_price: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    QuantityUpdated(QuantityUpdated),
    PriceUpdated(PriceUpdated),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::QuantityUpdated(_) => "inventory.product.quantity_updated",
            InventoryEvent::PriceUpdated(_) => "inventory.product.price_updated",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::QuantityUpdated(e) => e.occurred_at,
            InventoryEvent::PriceUpdated(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Inventory {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::QuantityUpdated(e) => {
                if let Some(idx) = self.position(&e.name) {
                    self.items[idx].set_quantity(e.quantity);
                }
            }
            InventoryEvent::PriceUpdated(e) => {
                if let Some(idx) = self.position(&e.name) {
                    self.items[idx].set_unit_price(e.unit_price);
                }
            }
        }

        self.version += 1;
        self.history
            .push(EventEnvelope::new(AGGREGATE_TYPE, self.version, event.clone()));
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::UpdateQuantity(cmd) => self.handle_update_quantity(cmd),
            InventoryCommand::UpdatePrice(cmd) => self.handle_update_price(cmd),
        }
    }
}

impl Inventory {
    fn handle_update_quantity(&self, cmd: &UpdateQuantity) -> Result<Vec<InventoryEvent>, DomainError> {
        let product = self.find(&cmd.name).ok_or_else(DomainError::not_found)?;

        Ok(vec![InventoryEvent::QuantityUpdated(QuantityUpdated {
            name: product.name().to_string(),
            previous: product.quantity(),
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update_price(&self, cmd: &UpdatePrice) -> Result<Vec<InventoryEvent>, DomainError> {
        let product = self.find(&cmd.name).ok_or_else(DomainError::not_found)?;

        Ok(vec![InventoryEvent::PriceUpdated(PriceUpdated {
            name: product.name().to_string(),
            previous: product.unit_price(),
            unit_price: cmd.unit_price,
            occurred_at: cmd.occurred_at,
        })])
    }
}
