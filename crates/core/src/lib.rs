//! `shelfkeep-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no console, no IO).

pub mod aggregate;
pub mod error;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use value_object::ValueObject;
