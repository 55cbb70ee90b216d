//! Domain events: immutable facts emitted by aggregates.

pub mod envelope;
pub mod event;

pub use envelope::EventEnvelope;
pub use event::Event;
