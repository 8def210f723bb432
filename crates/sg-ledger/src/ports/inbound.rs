//! # Driving Ports (API - Inbound)
//!
//! The public operations of the ledger and their request types. Every
//! mutation takes the calling address explicitly; there is no ambient
//! sender.

use crate::domain::entities::{OwnershipRecord, Profile, ProtocolSettings, Publication};
use crate::domain::scoring::{ActionFactors, ReputationFactors};
use crate::domain::state_machine::ProtocolState;
use crate::domain::value_objects::{
    ActionKind, Address, ProfileId, PubId, PublicationRef, Revision, StakeType, UnitId, WhitelistKind,
};
use crate::errors::LedgerResult;
use serde::{Deserialize, Serialize};

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Parameters for `create_profile`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProfileParams {
    /// Owner of the new profile.
    pub to: Address,
    /// Requested handle.
    pub handle: String,
    /// Avatar locator.
    pub image_uri: String,
    /// Optional follow module.
    pub follow_module: Option<Address>,
    /// Follow module initialisation payload.
    pub follow_module_init_data: Vec<u8>,
}

/// Parameters for `post`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostParams {
    /// Publishing profile.
    pub profile_id: ProfileId,
    /// Content locator.
    pub content_uri: String,
    /// Collect module (required).
    pub collect_module: Address,
    /// Collect module initialisation payload.
    pub collect_module_init_data: Vec<u8>,
    /// Optional reference module.
    pub reference_module: Option<Address>,
    /// Reference module initialisation payload.
    pub reference_module_init_data: Vec<u8>,
    /// Bets on this post close at this timestamp.
    pub bet_deadline: Option<u64>,
}

/// Parameters for `comment`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentParams {
    /// Publishing profile.
    pub profile_id: ProfileId,
    /// Content locator.
    pub content_uri: String,
    /// Publication being answered.
    pub pointed: PublicationRef,
    /// Payload for the pointed publication's reference module.
    pub reference_module_data: Vec<u8>,
    /// Collect module (required).
    pub collect_module: Address,
    /// Collect module initialisation payload.
    pub collect_module_init_data: Vec<u8>,
    /// Optional reference module.
    pub reference_module: Option<Address>,
    /// Reference module initialisation payload.
    pub reference_module_init_data: Vec<u8>,
}

/// Parameters for `mirror`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorParams {
    /// Publishing profile.
    pub profile_id: ProfileId,
    /// Publication being mirrored.
    pub pointed: PublicationRef,
    /// Payload for the root's reference module.
    pub reference_module_data: Vec<u8>,
    /// Optional reference module.
    pub reference_module: Option<Address>,
    /// Reference module initialisation payload.
    pub reference_module_init_data: Vec<u8>,
}

/// Parameters for `stake`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeParams {
    /// Profile placing the stake.
    pub staker: ProfileId,
    /// Target publication (mirrors resolve to their root).
    pub publication: PublicationRef,
    /// Boost or bet.
    pub stake_type: StakeType,
    /// Amount in `currency` units.
    pub amount: u128,
    /// Whitelisted staking token.
    pub currency: Address,
}

// =============================================================================
// API
// =============================================================================

/// The social-graph ledger API.
///
/// Every mutation is atomic: it either completes or returns an error with the
/// ledger unchanged and no events delivered.
pub trait SocialGraphApi {
    // --- identity ---

    /// Mints a profile to `params.to`.
    fn create_profile(&self, caller: Address, params: CreateProfileParams) -> LedgerResult<ProfileId>;

    /// Sets or clears the caller's default profile.
    fn set_default_profile(&self, caller: Address, profile_id: Option<ProfileId>) -> LedgerResult<()>;

    /// Sets or clears a profile's dispatcher.
    fn set_dispatcher(&self, caller: Address, profile_id: ProfileId, dispatcher: Option<Address>) -> LedgerResult<()>;

    /// Sets or clears a profile's follow module.
    fn set_follow_module(
        &self,
        caller: Address,
        profile_id: ProfileId,
        follow_module: Option<Address>,
        init_data: &[u8],
    ) -> LedgerResult<()>;

    /// Moves a profile to a new owner.
    fn transfer_profile(&self, caller: Address, profile_id: ProfileId, to: Address) -> LedgerResult<()>;

    /// Burns a profile and releases its handle.
    fn burn_profile(&self, caller: Address, profile_id: ProfileId) -> LedgerResult<()>;

    /// Publishes a post.
    fn post(&self, caller: Address, params: PostParams) -> LedgerResult<PubId>;

    /// Publishes a comment.
    fn comment(&self, caller: Address, params: CommentParams) -> LedgerResult<PubId>;

    /// Publishes a mirror.
    fn mirror(&self, caller: Address, params: MirrorParams) -> LedgerResult<PubId>;

    // --- interactions ---

    /// Follows each profile in order, returning the minted unit ids.
    fn follow(&self, caller: Address, profile_ids: &[ProfileId], data: &[Vec<u8>]) -> LedgerResult<Vec<UnitId>>;

    /// Collects the root of a publication, returning the minted unit id.
    fn collect(&self, caller: Address, profile_id: ProfileId, pub_id: PubId, data: &[u8]) -> LedgerResult<UnitId>;

    /// Up-votes (`amount > 0`) or down-votes a publication once.
    fn vote(&self, caller: Address, profile_id: ProfileId, pub_id: PubId, amount: i8) -> LedgerResult<()>;

    /// Likes a publication once.
    fn like(&self, caller: Address, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<()>;

    /// Reports a publication once.
    fn report(&self, caller: Address, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<()>;

    /// Stakes tokens on a publication.
    fn stake(&self, caller: Address, params: StakeParams) -> LedgerResult<()>;

    /// Sets the winning option of a closed bet.
    fn resolve_bet(&self, caller: Address, profile_id: ProfileId, pub_id: PubId, correct_option: u8) -> LedgerResult<()>;

    // --- scoring and governance ---

    /// Records the outcome of a judged recommendation.
    fn record_recommendation_outcome(&self, caller: Address, profile_id: ProfileId, successful: bool) -> LedgerResult<()>;

    /// Moves the protocol state machine.
    fn set_state(&self, caller: Address, state: ProtocolState) -> LedgerResult<()>;

    /// Replaces governance.
    fn set_governance(&self, caller: Address, governance: Address) -> LedgerResult<()>;

    /// Appoints or removes the emergency admin.
    fn set_emergency_admin(&self, caller: Address, admin: Option<Address>) -> LedgerResult<()>;

    /// Adds or removes a whitelist entry.
    fn set_whitelisted(&self, caller: Address, kind: WhitelistKind, address: Address, whitelisted: bool) -> LedgerResult<()>;

    /// Writes action weights for a revision.
    fn set_action_factors(&self, caller: Address, revision: Revision, factors: ActionFactors) -> LedgerResult<()>;

    /// Writes reputation weights for a revision.
    fn set_reputation_factors(&self, caller: Address, revision: Revision, factors: ReputationFactors) -> LedgerResult<()>;

    /// Activates a written revision.
    fn set_current_revision(&self, caller: Address, revision: Revision) -> LedgerResult<()>;

    // --- queries ---

    /// Profile by id; burned profiles are reported as absent.
    fn get_profile(&self, profile_id: ProfileId) -> LedgerResult<Option<Profile>>;

    /// Profile id reserved under `handle`.
    fn get_profile_id_by_handle(&self, handle: &str) -> LedgerResult<Option<ProfileId>>;

    /// Publication by key.
    fn get_publication(&self, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<Option<Publication>>;

    /// Root of a publication: itself unless it is a mirror.
    fn get_pointed_if_mirror(&self, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<PublicationRef>;

    /// Default profile of a wallet.
    fn get_default_profile(&self, wallet: Address) -> LedgerResult<Option<ProfileId>>;

    /// Whether `follower` follows `profile_id`.
    fn is_following(&self, profile_id: ProfileId, follower: Address) -> LedgerResult<bool>;

    /// Whether `actor` has performed `kind` on a publication.
    fn has_acted(&self, publication: PublicationRef, actor: Address, kind: ActionKind) -> LedgerResult<bool>;

    /// Reputation of a profile.
    fn reputation(&self, profile_id: ProfileId) -> LedgerResult<i64>;

    /// Level of a profile.
    fn level(&self, profile_id: ProfileId) -> LedgerResult<u32>;

    /// Ownership record by address.
    fn get_ownership_record(&self, record: Address) -> LedgerResult<Option<OwnershipRecord>>;

    /// Holder of a minted unit.
    fn unit_owner(&self, record: Address, unit: UnitId) -> LedgerResult<Option<Address>>;

    /// Protocol settings.
    fn protocol_settings(&self) -> LedgerResult<ProtocolSettings>;
}
