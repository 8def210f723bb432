//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the ledger depends on:
//! - the key-value ledger store, with transaction brackets
//! - pluggable follow / collect / reference policy modules
//! - fungible-token transfer into custody
//! - event delivery and wall-clock time
//!
//! All ports are synchronous. Operations run to completion without
//! suspension, so nothing here is `async`.

use crate::domain::entities::{
    ActionKey, OwnershipRecord, Profile, ProtocolSettings, Publication, StakeKey,
};
use crate::domain::scoring::{ActionFactors, ReputationFactors};
use crate::domain::value_objects::{
    Address, Hash, ProfileId, PubId, PublicationRef, Revision, UnitId, WhitelistKind,
};
use crate::errors::{ModuleError, StoreError, TransferError};
use crate::events::EventRecord;

// =============================================================================
// LEDGER STORE
// =============================================================================

/// Keyed ledger storage.
///
/// ## Transactions
///
/// Between [`begin`](LedgerStore::begin) and [`commit`](LedgerStore::commit)
/// every write must be undoable by [`rollback`](LedgerStore::rollback), which
/// restores the exact pre-`begin` contents. Writes outside a transaction
/// apply immediately. Only one transaction may be open at a time.
pub trait LedgerStore: Send + Sync {
    /// Opens a transaction.
    fn begin(&self) -> Result<(), StoreError>;

    /// Keeps every write since `begin`.
    fn commit(&self) -> Result<(), StoreError>;

    /// Discards every write since `begin`.
    fn rollback(&self) -> Result<(), StoreError>;

    // --- protocol ---

    /// Protocol settings row, `None` before genesis.
    fn settings(&self) -> Result<Option<ProtocolSettings>, StoreError>;

    /// Overwrites the protocol settings row.
    fn put_settings(&self, settings: ProtocolSettings) -> Result<(), StoreError>;

    /// Whether `address` is on the `kind` whitelist.
    fn is_whitelisted(&self, kind: WhitelistKind, address: Address) -> Result<bool, StoreError>;

    /// Adds or removes `address` on the `kind` whitelist.
    fn set_whitelisted(
        &self,
        kind: WhitelistKind,
        address: Address,
        whitelisted: bool,
    ) -> Result<(), StoreError>;

    /// Action weights written for `revision`.
    fn action_factors(&self, revision: Revision) -> Result<Option<ActionFactors>, StoreError>;

    /// Writes action weights for `revision`.
    fn put_action_factors(&self, revision: Revision, factors: ActionFactors) -> Result<(), StoreError>;

    /// Reputation weights written for `revision`.
    fn reputation_factors(&self, revision: Revision) -> Result<Option<ReputationFactors>, StoreError>;

    /// Writes reputation weights for `revision`.
    fn put_reputation_factors(
        &self,
        revision: Revision,
        factors: ReputationFactors,
    ) -> Result<(), StoreError>;

    // --- identity ---

    /// Profile by id, including burned profiles.
    fn profile(&self, id: ProfileId) -> Result<Option<Profile>, StoreError>;

    /// Inserts or overwrites a profile.
    fn put_profile(&self, profile: Profile) -> Result<(), StoreError>;

    /// Profile id reserved under a handle key.
    fn handle_owner(&self, key: &Hash) -> Result<Option<ProfileId>, StoreError>;

    /// Reserves (`Some`) or releases (`None`) a handle key.
    fn set_handle_owner(&self, key: Hash, id: Option<ProfileId>) -> Result<(), StoreError>;

    /// Default profile of a wallet.
    fn default_profile(&self, wallet: Address) -> Result<Option<ProfileId>, StoreError>;

    /// Sets or clears a wallet's default profile.
    fn set_default_profile(&self, wallet: Address, id: Option<ProfileId>) -> Result<(), StoreError>;

    /// Publication by key.
    fn publication(&self, key: PublicationRef) -> Result<Option<Publication>, StoreError>;

    /// Inserts or overwrites a publication.
    fn put_publication(&self, publication: Publication) -> Result<(), StoreError>;

    // --- interaction flags ---

    /// Whether the action flag is set.
    fn has_acted(&self, key: &ActionKey) -> Result<bool, StoreError>;

    /// Sets the action flag.
    fn set_acted(&self, key: ActionKey) -> Result<(), StoreError>;

    /// Whether the stake flag is set.
    fn has_staked(&self, key: &StakeKey) -> Result<bool, StoreError>;

    /// Sets the stake flag.
    fn set_staked(&self, key: StakeKey) -> Result<(), StoreError>;

    // --- ownership records ---

    /// Ownership record by address.
    fn ownership_record(&self, address: Address) -> Result<Option<OwnershipRecord>, StoreError>;

    /// Inserts or overwrites an ownership record.
    fn put_ownership_record(&self, record: OwnershipRecord) -> Result<(), StoreError>;

    /// Holder of a minted unit.
    fn unit_owner(&self, record: Address, unit: UnitId) -> Result<Option<Address>, StoreError>;

    /// Assigns a unit to a holder.
    fn set_unit_owner(&self, record: Address, unit: UnitId, owner: Address) -> Result<(), StoreError>;

    /// Units of `record` held by `holder`.
    fn unit_balance(&self, record: Address, holder: Address) -> Result<u64, StoreError>;

    /// Sets the unit count of `holder`.
    fn set_unit_balance(&self, record: Address, holder: Address, balance: u64) -> Result<(), StoreError>;
}

// =============================================================================
// POLICY MODULES
// =============================================================================

/// Follow policy, consulted on every follow of a profile that configures it.
pub trait FollowModule: Send + Sync {
    /// Called when a profile adopts this module.
    fn initialize_follow_module(&self, profile_id: ProfileId, data: &[u8]) -> Result<(), ModuleError>;

    /// Approves or rejects a follow. Rejection rolls back the whole call.
    fn process_follow(&self, follower: Address, profile_id: ProfileId, data: &[u8]) -> Result<(), ModuleError>;

    /// Whether `follower` counts as following `profile_id`.
    ///
    /// `holds_unit` is the ledger's own answer: the follower holds at least
    /// one follow unit of the profile.
    fn is_following(&self, _profile_id: ProfileId, _follower: Address, holds_unit: bool) -> bool {
        holds_unit
    }
}

/// Collect policy, consulted on every collect of a root publication.
pub trait CollectModule: Send + Sync {
    /// Called when a post or comment adopts this module.
    fn initialize_publication_collect_module(
        &self,
        profile_id: ProfileId,
        pub_id: PubId,
        data: &[u8],
    ) -> Result<(), ModuleError>;

    /// Approves or rejects a collect. Rejection rolls back the mint.
    fn process_collect(
        &self,
        referrer_profile_id: ProfileId,
        collector: Address,
        root_profile_id: ProfileId,
        root_pub_id: PubId,
        data: &[u8],
    ) -> Result<(), ModuleError>;
}

/// Read access to the follow graph, handed to reference modules.
pub trait FollowGraph {
    /// Whether `follower` follows `profile_id`.
    fn is_following(&self, profile_id: ProfileId, follower: Address) -> Result<bool, StoreError>;

    /// Owner of a live profile.
    fn profile_owner(&self, profile_id: ProfileId) -> Result<Option<Address>, StoreError>;
}

/// Reference policy, consulted when a publication is commented on or mirrored.
pub trait ReferenceModule: Send + Sync {
    /// Called when a publication adopts this module.
    fn initialize_reference_module(
        &self,
        profile_id: ProfileId,
        pub_id: PubId,
        data: &[u8],
    ) -> Result<(), ModuleError>;

    /// Approves or rejects a comment on `pointed`.
    fn process_comment(
        &self,
        profile_id: ProfileId,
        pointed: PublicationRef,
        data: &[u8],
        graph: &dyn FollowGraph,
    ) -> Result<(), ModuleError>;

    /// Approves or rejects a mirror of `pointed`.
    fn process_mirror(
        &self,
        profile_id: ProfileId,
        pointed: PublicationRef,
        data: &[u8],
        graph: &dyn FollowGraph,
    ) -> Result<(), ModuleError>;
}

// =============================================================================
// TOKEN TRANSFER
// =============================================================================

/// Fungible-token transfers used for staking.
pub trait TokenTransfer: Send + Sync {
    /// Moves `amount` of `currency` from `payer` into `custody`.
    fn transfer_from(
        &self,
        currency: Address,
        payer: Address,
        custody: Address,
        amount: u128,
    ) -> Result<(), TransferError>;
}

// =============================================================================
// EVENTS AND TIME
// =============================================================================

/// Receives committed events in sequence order.
pub trait EventSink: Send + Sync {
    /// Delivers one event. Called only after the emitting operation commits.
    fn emit(&self, record: EventRecord);
}

/// Source of operation timestamps (unix seconds).
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> u64;
}
