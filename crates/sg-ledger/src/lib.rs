//! # SG Ledger - Social-Graph Interaction and Scoring Engine
//!
//! Owns profiles with unique handles, publications (posts, comments,
//! mirrors), lazily provisioned follow / collect ownership records, and a
//! content-scoring model that weights every interaction by the content
//! owner's reputation level.
//!
//! ## Architecture
//!
//! ```text
//!   SocialGraphApi (ports::inbound)
//!          │
//!   SocialLedgerService (service) ── atomically: begin → op → commit | rollback
//!          │
//!   domain: entities, scoring, state machine, access policy, invariants
//!          │
//!   ports::outbound: LedgerStore, Follow/Collect/ReferenceModule,
//!                    TokenTransfer, EventSink, Clock
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Handle ↔ profile bijection | `domain/invariants.rs` - `check_handle_bijection()` |
//! | Score total equals sum of sub-scores | `domain/invariants.rs` - `check_score_sum()` |
//! | Mirrors carry a pointer and no collect module | `domain/invariants.rs` - `check_publication_shape()` |
//! | Follow record set once | `domain/invariants.rs` - `check_follow_record_stable()` |
//! | Failed operations leave no trace | `service/mod.rs` - `atomically()` |
//!
//! ## Protocol States
//!
//! | State | Profile creation | Publishing | Interactions |
//! |-------|------------------|------------|--------------|
//! | `Unpaused` | yes | yes | yes |
//! | `PublishingPaused` | no | no | yes |
//! | `Paused` | no | no | no |
//!
//! ## Usage Example
//!
//! ```no_run
//! use sg_ledger::prelude::*;
//!
//! # fn main() -> Result<(), LedgerError> {
//! let ledger = create_test_service()?;
//! let alice = ledger.create_profile(fixtures::ALICE, "alice")?;
//! let post = ledger.post(fixtures::ALICE, alice)?;
//! ledger.service.vote(fixtures::BOB, alice, post, 1)?;
//! assert_eq!(ledger.service.reputation(alice)?, 2);
//! # Ok(())
//! # }
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::entities::{
        ActionKey, BetPool, ContentScore, OwnershipRecord, OwnershipScope, Profile, ProfileStats,
        ProtocolSettings, Publication, PublicationKind, StakeKey, StakePool, VoteTally,
    };
    pub use crate::domain::scoring::{
        ActionFactors, LevelThresholds, RecommendationPolicy, ReputationFactors, ScoreModel,
    };
    pub use crate::domain::state_machine::ProtocolState;
    pub use crate::domain::value_objects::{
        ActionKind, Address, Hash, ProfileId, PubId, PublicationRef, Revision, StakeType, UnitId,
        WhitelistKind,
    };

    // Ports
    pub use crate::ports::inbound::{
        CommentParams, CreateProfileParams, MirrorParams, PostParams, SocialGraphApi, StakeParams,
    };
    pub use crate::ports::outbound::{
        Clock, CollectModule, EventSink, FollowGraph, FollowModule, LedgerStore, ReferenceModule,
        TokenTransfer,
    };

    // Adapters
    pub use crate::adapters::{
        ApprovalFollowModule, BroadcastEventSink, FollowerOnlyReferenceModule, FreeCollectModule,
        InMemoryLedgerStore, InMemoryTokenCustody, LimitedCollectModule, ManualClock,
        RecordingEventSink, SystemClock,
    };

    // Service
    pub use crate::service::{
        create_test_service, fixtures, ModuleRegistry, ServiceStats, SocialLedgerService,
        TestLedger,
    };

    // Config, events, errors
    pub use crate::config::{LedgerConfig, ScoringConfig};
    pub use crate::errors::{LedgerError, LedgerResult, ModuleError, StoreError, TransferError};
    pub use crate::events::{EventRecord, LedgerEvent};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
