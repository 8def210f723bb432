//! # Domain Layer (Inner Hexagon)
//!
//! Pure ledger logic with no I/O.

pub mod access;
pub mod entities;
pub mod invariants;
pub mod scoring;
pub mod services;
pub mod state_machine;
pub mod value_objects;

pub use access::{AccessPolicy, Role};
pub use entities::*;
pub use scoring::{ActionFactors, LevelThresholds, RecommendationPolicy, ReputationFactors, ScoreModel};
pub use state_machine::ProtocolState;
pub use value_objects::*;
