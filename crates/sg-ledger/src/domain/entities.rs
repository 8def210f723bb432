//! # Core Domain Entities
//!
//! Records held by the ledger: profiles, publications, provisioned ownership
//! records and the protocol-wide settings row.

use super::state_machine::ProtocolState;
use super::value_objects::{ActionKind, Address, ProfileId, PubId, PublicationRef, Revision, StakeType, UnitId};
use serde::{Deserialize, Serialize};

// =============================================================================
// PROFILE
// =============================================================================

/// Aggregates maintained on a profile by publishing and interactions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    /// Sum of score deltas applied to this profile's publications.
    pub content_score: i64,
    /// Comments authored by this profile.
    pub answers: u64,
    /// Recommendations judged successful.
    pub recommendations_successful: u64,
    /// Recommendations judged at all.
    pub recommendations_attempted: u64,
    /// Stakes placed by this profile, boosts and bets alike.
    pub bet_count: u64,
    /// Times this profile's content was collected.
    pub collected: u64,
    /// Times this profile's content was mirrored.
    pub mirrored: u64,
}

/// An owned identity record with a unique handle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile id.
    pub id: ProfileId,
    /// Current owner. `None` once the profile has been burned.
    pub owner: Option<Address>,
    /// Reserved handle. Empty once burned.
    pub handle: String,
    /// Avatar locator.
    pub image_uri: String,
    /// Follow policy module, if any.
    pub follow_module: Option<Address>,
    /// Follow-ownership record, provisioned on first follow.
    pub follow_record: Option<Address>,
    /// Number of publications created so far.
    pub pub_count: u64,
    /// Delegate allowed to publish on the owner's behalf.
    pub dispatcher: Option<Address>,
    /// Derived aggregates.
    pub stats: ProfileStats,
    /// Creation timestamp (unix seconds).
    pub created_at: u64,
}

impl Profile {
    /// Creates a fresh profile owned by `owner`.
    #[must_use]
    pub fn new(id: ProfileId, owner: Address, handle: String, image_uri: String, now: u64) -> Self {
        Self {
            id,
            owner: Some(owner),
            handle,
            image_uri,
            follow_module: None,
            follow_record: None,
            pub_count: 0,
            dispatcher: None,
            stats: ProfileStats::default(),
            created_at: now,
        }
    }

    /// Returns true once the owning token has been burned.
    #[must_use]
    pub fn is_burned(&self) -> bool {
        self.owner.is_none()
    }

    /// Returns true if `caller` owns this profile.
    #[must_use]
    pub fn is_owner(&self, caller: Address) -> bool {
        self.owner == Some(caller)
    }

    /// Returns true if `caller` owns this profile or is its dispatcher.
    #[must_use]
    pub fn is_owner_or_dispatcher(&self, caller: Address) -> bool {
        self.is_owner(caller) || (self.dispatcher == Some(caller) && !self.is_burned())
    }
}

// =============================================================================
// PUBLICATION
// =============================================================================

/// Publication kind, derived from the stored fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicationKind {
    /// Original content with a collect module and no pointer.
    Post,
    /// Response with a collect module and a pointer.
    Comment,
    /// Re-share with a pointer and no collect module.
    Mirror,
}

/// Up/down vote tallies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Up-votes received.
    pub up: u64,
    /// Down-votes received.
    pub down: u64,
}

/// Per-publication score breakdown.
///
/// `total` always equals the sum of `sub_scores`; both are only ever moved
/// by the same signed delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentScore {
    /// Aggregate score.
    pub total: i64,
    /// One signed sub-score per [`ActionKind`], indexed by `ActionKind::index`.
    pub sub_scores: [i64; ActionKind::COUNT],
}

impl ContentScore {
    /// Sub-score for one category.
    #[must_use]
    pub fn sub_score(&self, kind: ActionKind) -> i64 {
        self.sub_scores[kind.index()]
    }

    /// Adds `delta` to the category and the total.
    ///
    /// Returns `None` and leaves the score untouched on overflow.
    #[must_use]
    pub fn apply(&self, kind: ActionKind, delta: i64) -> Option<Self> {
        let total = self.total.checked_add(delta)?;
        let mut sub_scores = self.sub_scores;
        sub_scores[kind.index()] = sub_scores[kind.index()].checked_add(delta)?;
        Some(Self { total, sub_scores })
    }
}

/// Accumulator for boost stakes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePool {
    /// Total amount staked.
    pub amount: u128,
    /// Distinct staking profiles.
    pub stakers: u64,
}

/// Accumulator and resolution state for bet stakes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetPool {
    /// Total amount wagered.
    pub amount: u128,
    /// Distinct betting profiles.
    pub stakers: u64,
    /// Bets close at this unix timestamp, when set.
    pub deadline: Option<u64>,
    /// Winning option, once resolved.
    pub correct_option: Option<u8>,
}

impl BetPool {
    /// Returns true while new bets may be placed.
    #[must_use]
    pub fn is_open(&self, now: u64) -> bool {
        self.correct_option.is_none() && self.deadline.map_or(true, |deadline| now < deadline)
    }
}

/// A content record scoped to a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Owning profile.
    pub profile_id: ProfileId,
    /// Local id.
    pub pub_id: PubId,
    /// Target of a comment or mirror.
    pub pointer: Option<PublicationRef>,
    /// Content locator. Empty for mirrors.
    pub content_uri: String,
    /// Collect policy module. Never set on mirrors.
    pub collect_module: Option<Address>,
    /// Collect-ownership record, provisioned on first collect.
    pub collect_record: Option<Address>,
    /// Reference policy module.
    pub reference_module: Option<Address>,
    /// Vote tallies.
    pub votes: VoteTally,
    /// Likes received.
    pub likes: u64,
    /// Reports received.
    pub reports: u64,
    /// Score aggregate.
    pub score: ContentScore,
    /// Boost accumulator.
    pub boost: StakePool,
    /// Bet accumulator.
    pub bet: BetPool,
    /// Times collected.
    pub collected: u64,
    /// Times mirrored.
    pub mirrored: u64,
    /// Creation timestamp (unix seconds).
    pub created_at: u64,
}

impl Publication {
    /// Creates an empty publication record.
    #[must_use]
    pub fn new(profile_id: ProfileId, pub_id: PubId, now: u64) -> Self {
        Self {
            profile_id,
            pub_id,
            pointer: None,
            content_uri: String::new(),
            collect_module: None,
            collect_record: None,
            reference_module: None,
            votes: VoteTally::default(),
            likes: 0,
            reports: 0,
            score: ContentScore::default(),
            boost: StakePool::default(),
            bet: BetPool::default(),
            collected: 0,
            mirrored: 0,
            created_at: now,
        }
    }

    /// Key of this publication.
    #[must_use]
    pub fn reference(&self) -> PublicationRef {
        PublicationRef::new(self.profile_id, self.pub_id)
    }

    /// Kind derived from the collect module and pointer.
    #[must_use]
    pub fn kind(&self) -> PublicationKind {
        match (self.collect_module.is_some(), self.pointer.is_some()) {
            (false, _) => PublicationKind::Mirror,
            (true, true) => PublicationKind::Comment,
            (true, false) => PublicationKind::Post,
        }
    }

    /// Returns true for mirrors.
    #[must_use]
    pub fn is_mirror(&self) -> bool {
        self.kind() == PublicationKind::Mirror
    }
}

// =============================================================================
// OWNERSHIP RECORDS
// =============================================================================

/// What a provisioned ownership record tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnershipScope {
    /// Follow units of a profile.
    Follow {
        /// Followed profile.
        profile_id: ProfileId,
    },
    /// Collect units of a root publication.
    Collect {
        /// Collected root publication.
        publication: PublicationRef,
    },
}

/// A lazily provisioned ledger of minted follow or collect units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    /// Deterministic record address.
    pub address: Address,
    /// What the units represent.
    pub scope: OwnershipScope,
    /// Display name derived from the profile handle.
    pub name: String,
    /// Display symbol derived from the profile handle.
    pub symbol: String,
    /// Back-reference to the ledger hub.
    pub hub: Address,
    /// Units minted so far.
    pub minted: u64,
    /// Provisioning timestamp (unix seconds).
    pub created_at: u64,
}

impl OwnershipRecord {
    /// Id the next minted unit will receive.
    #[must_use]
    pub fn next_unit_id(&self) -> UnitId {
        UnitId(self.minted + 1)
    }
}

// =============================================================================
// PROTOCOL SETTINGS
// =============================================================================

/// Protocol-wide singleton row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolSettings {
    /// Governance address.
    pub governance: Address,
    /// Emergency admin, if appointed.
    pub emergency_admin: Option<Address>,
    /// Current protocol state.
    pub state: ProtocolState,
    /// Active factor-table revision.
    pub current_revision: Revision,
    /// Profiles created so far (the last assigned profile id).
    pub profile_count: u64,
}

// =============================================================================
// FLAG KEYS
// =============================================================================

/// Key of a per-actor "has acted" flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionKey {
    /// Target publication.
    pub publication: PublicationRef,
    /// Acting address.
    pub actor: Address,
    /// Action category.
    pub kind: ActionKind,
}

impl ActionKey {
    /// Creates an action key.
    #[must_use]
    pub const fn new(publication: PublicationRef, actor: Address, kind: ActionKind) -> Self {
        Self {
            publication,
            actor,
            kind,
        }
    }
}

/// Key of a per-staker "has staked" flag, used for distinct staker counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StakeKey {
    /// Target publication.
    pub publication: PublicationRef,
    /// Staking profile.
    pub staker: ProfileId,
    /// Stake category.
    pub stake_type: StakeType,
}

// =============================================================================
// TESTS
// =============================================================================
