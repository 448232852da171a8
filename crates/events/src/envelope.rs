//! Envelope wrapping a drained event with stream metadata.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for a dispatched event, carrying aggregate + stream metadata.
///
/// This is the unit the orchestration layer hands to whatever consumes the
/// aggregate's notifications (a bus, a log, another bounded context).
///
/// Notes:
/// - `sequence_number` is monotonically increasing per aggregate stream.
/// - `payload` is the domain-agnostic event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    aggregate_id: Uuid,
    aggregate_type: String,

    /// Monotonically increasing position in the aggregate stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        aggregate_id: Uuid,
        aggregate_type: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            aggregate_id,
            aggregate_type: aggregate_type.into(),
            sequence_number,
            payload,
        }
    }

    /// Wrap a drained outbox batch, assigning sequence numbers starting at
    /// `base_version + 1`.
    ///
    /// `base_version` is the aggregate's version before the mutations that
    /// produced the batch — i.e. the version it was loaded at.
    pub fn enumerate(
        aggregate_id: Uuid,
        aggregate_type: &str,
        base_version: u64,
        events: Vec<E>,
    ) -> Vec<Self> {
        events
            .into_iter()
            .enumerate()
            .map(|(offset, payload)| {
                Self::new(
                    aggregate_id,
                    aggregate_type,
                    base_version + 1 + offset as u64,
                    payload,
                )
            })
            .collect()
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn aggregate_id(&self) -> Uuid {
        self.aggregate_id
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
