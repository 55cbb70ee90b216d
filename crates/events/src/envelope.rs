use serde::{Deserialize, Serialize};

use crate::event::Event;

/// An applied event plus its position in the aggregate's history.
///
/// `sequence_number` starts at 1 and equals the aggregate version right
/// after the event was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    aggregate_type: String,
    sequence_number: u64,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(aggregate_type: impl Into<String>, sequence_number: u64, payload: E) -> Self {
        Self {
            aggregate_type: aggregate_type.into(),
            sequence_number,
            payload,
        }
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

impl<E: Event> EventEnvelope<E> {
    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }
}
