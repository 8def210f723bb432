//! # Event Sinks
//!
//! [`EventSink`] adapters: an in-memory recorder and a tokio broadcast
//! fan-out for async subscribers.

use crate::events::{EventRecord, LedgerEvent};
use crate::ports::outbound::EventSink;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::debug;

// =============================================================================
// RECORDING SINK
// =============================================================================

/// Keeps every delivered event in memory.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    records: Mutex<Vec<EventRecord>>,
}

impl RecordingEventSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records delivered so far.
    #[must_use]
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().clone()
    }

    /// Payloads delivered so far.
    #[must_use]
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.records.lock().iter().map(|r| r.event.clone()).collect()
    }

    /// Number of delivered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Returns true if nothing was delivered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Drains and returns the delivered records.
    pub fn take(&self) -> Vec<EventRecord> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, record: EventRecord) {
        self.records.lock().push(record);
    }
}

// =============================================================================
// BROADCAST SINK
// =============================================================================

/// Fans committed events out to tokio broadcast subscribers.
///
/// Slow subscribers observe `RecvError::Lagged` rather than blocking the
/// ledger.
#[derive(Debug)]
pub struct BroadcastEventSink {
    sender: broadcast::Sender<EventRecord>,
}

impl BroadcastEventSink {
    /// Creates a sink whose channel buffers `capacity` records.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribes to events delivered after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EventRecord> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventSink for BroadcastEventSink {
    fn emit(&self, record: EventRecord) {
        let sequence = record.sequence;
        if self.sender.send(record).is_err() {
            debug!(sequence, "no event subscribers");
        }
    }
}
