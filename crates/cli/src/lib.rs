//! `shelfkeep-cli` — text-menu front end for the in-memory inventory.
//!
//! All console IO lives here; the session is generic over its input and
//! output so it can be driven by scripted tests.

pub mod config;
pub mod console;
pub mod error;
pub mod menu;
pub mod render;

pub use config::Config;
pub use console::Console;
pub use error::{CliError, CliResult};
pub use menu::{MenuChoice, Session};
