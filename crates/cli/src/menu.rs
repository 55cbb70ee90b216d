//! Interactive menu loop over the in-memory inventory.

use std::io::{BufRead, Write};

use chrono::Utc;
use serde::Serialize;

use shelfkeep_core::{Aggregate, AggregateRoot};
use shelfkeep_events::Event;
use shelfkeep_inventory::{
    Inventory, InventoryCommand, InventoryEvent, Money, SearchField, UpdatePrice, UpdateQuantity,
    analyze, low_stock, parse_quantity, parse_threshold,
};

use crate::config::Config;
use crate::console::Console;
use crate::error::{CliError, CliResult};
use crate::render;

/// Top-level menu entries, numbered 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    View,
    Search,
    Update,
    Analyze,
    Exit,
}

impl MenuChoice {
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(MenuChoice::View),
            2 => Some(MenuChoice::Search),
            3 => Some(MenuChoice::Update),
            4 => Some(MenuChoice::Analyze),
            5 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One interactive run: owns the inventory for the lifetime of the process.
pub struct Session<R, W> {
    console: Console<R, W>,
    inventory: Inventory,
    config: Config,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(inventory: Inventory, config: Config, input: R, output: W) -> Self {
        Self {
            console: Console::new(input, output),
            inventory,
            config,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_parts(self) -> (Inventory, W) {
        (self.inventory, self.console.into_output())
    }

    /// Run the menu until the user picks Exit or input ends.
    pub fn run(&mut self) -> CliResult<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(CliError::InputClosed) => {
                    tracing::info!("input closed; leaving menu");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn step(&mut self) -> CliResult<Flow> {
        render::menu(self.console.output())?;
        let answer = self.console.prompt("Enter your choice: ")?;

        let Ok(number) = answer.parse::<i64>() else {
            self.console.say("Error: Invalid input. Please enter a number.")?;
            return Ok(Flow::Continue);
        };

        match MenuChoice::from_number(number) {
            Some(choice) => self.dispatch(choice),
            None => {
                self.console.say("Invalid choice. Please try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> CliResult<Flow> {
        match choice {
            MenuChoice::View => self.view()?,
            MenuChoice::Search => self.search()?,
            MenuChoice::Update => self.update()?,
            MenuChoice::Analyze => self.analyze()?,
            MenuChoice::Exit => {
                self.console.say("Exiting program.")?;
                tracing::info!(updates = self.inventory.history().len(), "exiting");
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn view(&mut self) -> CliResult<()> {
        render::inventory_table(self.console.output(), self.inventory.items())?;
        Ok(())
    }

    fn search(&mut self) -> CliResult<()> {
        let field = self
            .console
            .prompt_until("Search by name (n) or category (c)? (n/c): ", |answer| {
                SearchField::from_choice(answer)
                    .ok_or_else(|| "Invalid field choice. Enter 'n' or 'c'.".to_string())
            })?;

        let label = match field {
            SearchField::Name => "Enter product name to search: ",
            SearchField::Category => "Enter product category to search: ",
        };
        let term = self.console.prompt(label)?;

        let found = self.inventory.search(&term, field);
        tracing::debug!(?field, term = %term, matches = found.len(), "search");
        if found.is_empty() {
            self.console.say("Products not found.")?;
        } else {
            render::inventory_table(self.console.output(), found)?;
        }
        Ok(())
    }

    fn update(&mut self) -> CliResult<()> {
        let name = self
            .console
            .prompt("Enter the name of the product to update: ")?;

        let Some(product) = self.inventory.find(&name) else {
            tracing::debug!(name = %name, "update rejected: product not found");
            self.console
                .say(format_args!("Product with name '{name}' not found."))?;
            return Ok(());
        };
        let name = product.name().to_string();
        self.console.say(format_args!("Found product: {name}"))?;

        let command = loop {
            if let Some(command) = self.read_update_command(&name)? {
                break command;
            }
        };

        match self.inventory.execute(&command) {
            Ok(events) => {
                for event in &events {
                    self.report_applied(event)?;
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "update rejected");
                self.console.say(format_args!("Error: {e}"))?;
            }
        }
        Ok(())
    }

    /// One round of the q/p prompt. `None` means the answer was rejected and
    /// the field choice should be asked again.
    fn read_update_command(&mut self, name: &str) -> CliResult<Option<InventoryCommand>> {
        let choice = self
            .console
            .prompt("Update quantity (q) or price (p)? (q/p): ")?
            .to_lowercase();

        let command = match choice.as_str() {
            "q" => {
                let raw = self.console.prompt("Enter new quantity: ")?;
                match parse_quantity(&raw) {
                    Ok(quantity) => InventoryCommand::UpdateQuantity(UpdateQuantity {
                        name: name.to_string(),
                        quantity,
                        occurred_at: Utc::now(),
                    }),
                    Err(e) => {
                        tracing::debug!(error = %e, "update rejected: bad quantity");
                        self.console.say(format_args!("Error: {e}"))?;
                        return Ok(None);
                    }
                }
            }
            "p" => {
                let raw = self.console.prompt("Enter new price: ")?;
                match raw.parse::<Money>() {
                    Ok(unit_price) => InventoryCommand::UpdatePrice(UpdatePrice {
                        name: name.to_string(),
                        unit_price,
                        occurred_at: Utc::now(),
                    }),
                    Err(e) => {
                        tracing::debug!(error = %e, "update rejected: bad price");
                        self.console.say(format_args!("Error: {e}"))?;
                        return Ok(None);
                    }
                }
            }
            _ => {
                self.console.say("Invalid choice. Enter 'q' or 'p'.")?;
                return Ok(None);
            }
        };
        Ok(Some(command))
    }

    fn report_applied(&mut self, event: &InventoryEvent) -> CliResult<()> {
        // Failures are logged inside; the console report does not depend on them.
        let _ = log_applied(event.event_type(), self.inventory.version(), event);
        let message = match event {
            InventoryEvent::QuantityUpdated(_) => "Quantity updated.",
            InventoryEvent::PriceUpdated(_) => "Price updated.",
        };
        self.console.say(message)
    }

    fn analyze(&mut self) -> CliResult<()> {
        let analysis = analyze(self.inventory.items());
        if analysis.is_empty() {
            self.console.say(render::EMPTY_NOTICE)?;
            return Ok(());
        }
        tracing::debug!(
            categories = analysis.totals.len(),
            grand_total = %analysis.grand_total(),
            "analysis computed"
        );
        render::analysis_report(self.console.output(), &analysis, &self.config.currency)?;

        let raw = self
            .console
            .prompt("Enter the minimum quantity for checking: ")?;
        let threshold = match parse_threshold(&raw) {
            Ok(threshold) => threshold,
            Err(e) => {
                self.console.say(format_args!("Error: {e}"))?;
                return Ok(());
            }
        };

        let low = low_stock(self.inventory.items(), threshold);
        render::low_stock_report(self.console.output(), threshold, &low)?;
        Ok(())
    }
}

/// Log an applied event with its JSON payload, or with the serialization
/// error when the payload cannot be encoded.
fn log_applied(event_type: &str, sequence: u64, payload: &impl Serialize) -> serde_json::Result<()> {
    match serde_json::to_string(payload) {
        Ok(payload) => {
            tracing::info!(event_type, sequence, payload = %payload, "inventory updated");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(event_type, sequence, error = %e, "inventory updated; payload not serializable");
            Err(e)
        }
    }
}
