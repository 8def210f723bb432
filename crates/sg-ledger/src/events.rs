//! # Event Schema
//!
//! Events emitted by ledger operations. Events produced inside an operation
//! are buffered and delivered only after the operation commits, each wrapped
//! in an [`EventRecord`] carrying a gap-free sequence number and the
//! operation's timestamp.

use crate::domain::scoring::{ActionFactors, ReputationFactors};
use crate::domain::state_machine::ProtocolState;
use crate::domain::value_objects::{
    ActionKind, Address, ProfileId, PubId, PublicationRef, Revision, StakeType, UnitId, WhitelistKind,
};
use serde::{Deserialize, Serialize};

/// Envelope for a delivered event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotonic delivery sequence, starting at 1.
    pub sequence: u64,
    /// Timestamp of the emitting operation (unix seconds).
    pub timestamp: u64,
    /// Payload.
    pub event: LedgerEvent,
}

/// Ledger events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    // =========================================================================
    // PROFILES
    // =========================================================================
    /// A profile was minted.
    ProfileCreated {
        /// Profile concerned.
        profile_id: ProfileId,
        /// Caller that created the profile.
        creator: Address,
        /// Owning wallet.
        owner: Address,
        /// Profile handle.
        handle: String,
        /// Profile image URI.
        image_uri: String,
        /// Follow module address, if any.
        follow_module: Option<Address>,
    },
    /// Profile ownership moved.
    ProfileTransferred {
        /// Profile concerned.
        profile_id: ProfileId,
        /// Previous owner.
        from: Address,
        /// New owner.
        to: Address,
    },
    /// A profile was burned and its handle released.
    ProfileBurned {
        /// Profile concerned.
        profile_id: ProfileId,
        /// Owner at burn time.
        owner: Address,
        /// Handle released by the burn.
        handle: String,
    },
    /// A wallet's default profile changed.
    DefaultProfileSet {
        /// Wallet concerned.
        wallet: Address,
        /// New default profile, if any.
        profile_id: Option<ProfileId>,
    },
    /// A profile's dispatcher changed.
    DispatcherSet {
        /// Profile concerned.
        profile_id: ProfileId,
        /// New dispatcher, if any.
        dispatcher: Option<Address>,
    },
    /// A profile's follow module changed.
    FollowModuleSet {
        /// Profile concerned.
        profile_id: ProfileId,
        /// Follow module address, if any.
        follow_module: Option<Address>,
    },

    // =========================================================================
    // PUBLICATIONS
    // =========================================================================
    /// A post was published.
    PostCreated {
        /// Profile concerned.
        profile_id: ProfileId,
        /// Publication id within the profile.
        pub_id: PubId,
        /// Content URI.
        content_uri: String,
        /// Collect module address.
        collect_module: Address,
        /// Reference module address, if any.
        reference_module: Option<Address>,
        /// Bet deadline (unix seconds), if the post is a bet.
        bet_deadline: Option<u64>,
    },
    /// A comment was published.
    CommentCreated {
        /// Profile concerned.
        profile_id: ProfileId,
        /// Publication id within the profile.
        pub_id: PubId,
        /// Content URI.
        content_uri: String,
        /// Publication being commented on or mirrored.
        pointed: PublicationRef,
        /// Collect module address.
        collect_module: Address,
        /// Reference module address, if any.
        reference_module: Option<Address>,
    },
    /// A mirror was published.
    MirrorCreated {
        /// Profile concerned.
        profile_id: ProfileId,
        /// Publication id within the profile.
        pub_id: PubId,
        /// Publication being commented on or mirrored.
        pointed: PublicationRef,
        /// Reference module address, if any.
        reference_module: Option<Address>,
    },

    // =========================================================================
    // OWNERSHIP RECORDS
    // =========================================================================
    /// A follow-ownership record was created.
    FollowOwnershipProvisioned {
        /// Profile concerned.
        profile_id: ProfileId,
        /// Address of the ownership record.
        record: Address,
    },
    /// A collect-ownership record was created.
    CollectOwnershipProvisioned {
        /// Publication concerned.
        publication: PublicationRef,
        /// Address of the ownership record.
        record: Address,
    },

    // =========================================================================
    // INTERACTIONS
    // =========================================================================
    /// One batched follow call completed.
    Followed {
        /// Wallet that followed.
        follower: Address,
        /// Followed profiles, in call order.
        profile_ids: Vec<ProfileId>,
        /// Minted follow units, matching `profile_ids`.
        unit_ids: Vec<UnitId>,
    },
    /// A publication was collected.
    Collected {
        /// Wallet that collected.
        collector: Address,
        /// Publication the collect was requested on (may be a mirror).
        requested: PublicationRef,
        /// Resolved root that was actually collected.
        root: PublicationRef,
        /// Minted collect unit.
        unit_id: UnitId,
    },
    /// A vote was cast.
    Voted {
        /// Wallet that voted.
        voter: Address,
        /// Publication concerned.
        publication: PublicationRef,
        /// True for an upvote.
        upvote: bool,
    },
    /// A publication was liked.
    Liked {
        /// Wallet that acted.
        actor: Address,
        /// Publication concerned.
        publication: PublicationRef,
    },
    /// A publication was reported.
    Reported {
        /// Wallet that acted.
        actor: Address,
        /// Publication concerned.
        publication: PublicationRef,
    },
    /// Tokens were staked on a publication.
    Staked {
        /// Profile that staked.
        staker: ProfileId,
        /// Publication concerned.
        publication: PublicationRef,
        /// What the stake backs.
        stake_type: StakeType,
        /// Staked currency.
        currency: Address,
        /// Staked amount.
        amount: u128,
    },
    /// A bet received its correct option.
    BetResolved {
        /// Publication concerned.
        publication: PublicationRef,
        /// Winning option index.
        correct_option: u8,
    },

    // =========================================================================
    // SCORING
    // =========================================================================
    /// A non-zero score delta was applied.
    ContentScoreUpdated {
        /// Publication concerned.
        publication: PublicationRef,
        /// Wallet that acted.
        actor: Address,
        /// Action that produced the delta.
        kind: ActionKind,
        /// Score change applied.
        delta: i64,
        /// Publication score after the change.
        new_total: i64,
    },
    /// A recommendation outcome was judged.
    RecommendationRecorded {
        /// Profile concerned.
        profile_id: ProfileId,
        /// Whether the recommendation succeeded.
        successful: bool,
    },

    // =========================================================================
    // GOVERNANCE
    // =========================================================================
    /// Protocol state changed.
    StateChanged {
        /// Wallet that made the change.
        caller: Address,
        /// Previous state.
        previous: ProtocolState,
        /// New state.
        new: ProtocolState,
    },
    /// Governance changed.
    GovernanceSet {
        /// Wallet that made the change.
        caller: Address,
        /// Previous governance.
        previous: Address,
        /// New governance.
        new: Address,
    },
    /// Emergency admin changed.
    EmergencyAdminSet {
        /// Wallet that made the change.
        caller: Address,
        /// Previous emergency admin.
        previous: Option<Address>,
        /// New emergency admin.
        new: Option<Address>,
    },
    /// A whitelist entry changed.
    WhitelistUpdated {
        /// Whitelist that changed.
        kind: WhitelistKind,
        /// Whitelisted address.
        address: Address,
        /// New whitelist status.
        whitelisted: bool,
    },
    /// Action weights written for a revision.
    ActionFactorsSet {
        /// Factor table revision.
        revision: Revision,
        /// Weights written.
        factors: ActionFactors,
    },
    /// Reputation weights written for a revision.
    ReputationFactorsSet {
        /// Factor table revision.
        revision: Revision,
        /// Weights written.
        factors: ReputationFactors,
    },
    /// Current factor revision changed.
    RevisionActivated {
        /// Previous revision.
        previous: Revision,
        /// New revision.
        new: Revision,
    },
}

impl LedgerEvent {
    /// Stable event name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::ProfileCreated { .. } => "profile_created",
            LedgerEvent::ProfileTransferred { .. } => "profile_transferred",
            LedgerEvent::ProfileBurned { .. } => "profile_burned",
            LedgerEvent::DefaultProfileSet { .. } => "default_profile_set",
            LedgerEvent::DispatcherSet { .. } => "dispatcher_set",
            LedgerEvent::FollowModuleSet { .. } => "follow_module_set",
            LedgerEvent::PostCreated { .. } => "post_created",
            LedgerEvent::CommentCreated { .. } => "comment_created",
            LedgerEvent::MirrorCreated { .. } => "mirror_created",
            LedgerEvent::FollowOwnershipProvisioned { .. } => "follow_ownership_provisioned",
            LedgerEvent::CollectOwnershipProvisioned { .. } => "collect_ownership_provisioned",
            LedgerEvent::Followed { .. } => "followed",
            LedgerEvent::Collected { .. } => "collected",
            LedgerEvent::Voted { .. } => "voted",
            LedgerEvent::Liked { .. } => "liked",
            LedgerEvent::Reported { .. } => "reported",
            LedgerEvent::Staked { .. } => "staked",
            LedgerEvent::BetResolved { .. } => "bet_resolved",
            LedgerEvent::ContentScoreUpdated { .. } => "content_score_updated",
            LedgerEvent::RecommendationRecorded { .. } => "recommendation_recorded",
            LedgerEvent::StateChanged { .. } => "state_changed",
            LedgerEvent::GovernanceSet { .. } => "governance_set",
            LedgerEvent::EmergencyAdminSet { .. } => "emergency_admin_set",
            LedgerEvent::WhitelistUpdated { .. } => "whitelist_updated",
            LedgerEvent::ActionFactorsSet { .. } => "action_factors_set",
            LedgerEvent::ReputationFactorsSet { .. } => "reputation_factors_set",
            LedgerEvent::RevisionActivated { .. } => "revision_activated",
        }
    }
}
