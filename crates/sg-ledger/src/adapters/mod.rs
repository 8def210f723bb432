//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the driven ports.

pub mod clock;
pub mod custody;
pub mod event_sink;
pub mod memory_store;
pub mod modules;

pub use clock::{ManualClock, SystemClock};
pub use custody::InMemoryTokenCustody;
pub use event_sink::{BroadcastEventSink, RecordingEventSink};
pub use memory_store::{InMemoryLedgerStore, LedgerSnapshot};
pub use modules::{ApprovalFollowModule, FollowerOnlyReferenceModule, FreeCollectModule, LimitedCollectModule};
