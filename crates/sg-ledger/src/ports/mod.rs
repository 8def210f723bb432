//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Ports (Inbound)**: `SocialGraphApi` and its request types
//! - **Driven Ports (Outbound)**: `LedgerStore`, policy modules,
//!   `TokenTransfer`, `EventSink`, `Clock`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
