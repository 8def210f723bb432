//! # Social Ledger Service
//!
//! Application service wiring the domain to the driven ports.
//!
//! Every mutating operation runs through [`SocialLedgerService::atomically`]:
//!
//! ```text
//! begin ──→ gates + checks ──→ writes (journaled) ──→ commit ──→ deliver events
//!                  │                   │
//!                  └──── error ────────┴──→ rollback, drop buffered events
//! ```
//!
//! Operations are split by concern:
//! - `identity`: profiles, handles, publications
//! - `provisioning`: lazy follow / collect ownership records
//! - `interactions`: follow, collect, vote, like, report, stake
//! - `scoring`: action recording, reputation, level
//! - `governance`: protocol state, roles, whitelists, factor tables

mod governance;
mod identity;
mod interactions;
mod provisioning;
mod registry;
mod scoring;
mod testing;

pub use registry::ModuleRegistry;
pub use testing::{create_test_service, fixtures, test_config, TestLedger, TestService};

use crate::config::LedgerConfig;
use crate::domain::entities::{OwnershipRecord, Profile, ProtocolSettings, Publication};
use crate::domain::invariants::check_handle_bijection;
use crate::domain::scoring::{ActionFactors, ReputationFactors};
use crate::domain::services::handle_hash;
use crate::domain::state_machine::ProtocolState;
use crate::domain::value_objects::{
    ActionKind, Address, ProfileId, PubId, PublicationRef, Revision, UnitId, WhitelistKind,
};
use crate::errors::{LedgerError, LedgerResult, StoreError};
use crate::events::{EventRecord, LedgerEvent};
use crate::metrics;
use crate::ports::inbound::{
    CommentParams, CreateProfileParams, MirrorParams, PostParams, SocialGraphApi, StakeParams,
};
use crate::ports::outbound::{Clock, EventSink, FollowGraph, LedgerStore, TokenTransfer};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Statistics for the ledger service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Operations committed.
    pub operations_committed: u64,
    /// Operations rolled back.
    pub operations_rejected: u64,
    /// Events delivered to the sink.
    pub events_emitted: u64,
    /// Profiles created.
    pub profiles_created: u64,
    /// Posts, comments and mirrors created.
    pub publications_created: u64,
    /// Follow units minted.
    pub follows: u64,
    /// Collect units minted.
    pub collects: u64,
    /// Votes, likes and reports recorded.
    pub reactions: u64,
    /// Stakes placed.
    pub stakes: u64,
}

/// Per-operation scratch state: the operation timestamp and the events
/// waiting for commit.
#[derive(Debug)]
pub(crate) struct OpContext {
    pub(crate) now: u64,
    events: Vec<LedgerEvent>,
}

impl OpContext {
    fn new(now: u64) -> Self {
        Self {
            now,
            events: Vec::new(),
        }
    }

    pub(crate) fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }
}

/// The social-graph ledger service.
pub struct SocialLedgerService<S: LedgerStore, E: EventSink, C: Clock> {
    /// Service configuration.
    config: LedgerConfig,
    /// Ledger storage.
    store: S,
    /// Committed event delivery.
    events: E,
    /// Operation timestamps.
    clock: C,
    /// Staking token transfers.
    tokens: Arc<dyn TokenTransfer>,
    /// Policy module implementations.
    modules: ModuleRegistry,
    /// Next event sequence number.
    next_sequence: AtomicU64,
    /// Service statistics.
    stats: RwLock<ServiceStats>,
}

impl<S: LedgerStore, E: EventSink, C: Clock> SocialLedgerService<S, E, C> {
    /// Creates the service, writing genesis state into an empty store.
    ///
    /// A store that already holds protocol settings is reopened as-is.
    pub fn new(
        config: LedgerConfig,
        store: S,
        events: E,
        clock: C,
        tokens: Arc<dyn TokenTransfer>,
        modules: ModuleRegistry,
    ) -> LedgerResult<Self> {
        config.validate()?;
        let service = Self {
            config,
            store,
            events,
            clock,
            tokens,
            modules,
            next_sequence: AtomicU64::new(1),
            stats: RwLock::new(ServiceStats::default()),
        };
        service.genesis()?;
        Ok(service)
    }

    fn genesis(&self) -> LedgerResult<()> {
        if self.store.settings()?.is_some() {
            debug!("store already initialised");
            return Ok(());
        }
        let genesis = Revision(1);
        self.store.put_settings(ProtocolSettings {
            governance: self.config.governance,
            emergency_admin: self.config.emergency_admin,
            state: self.config.initial_state,
            current_revision: genesis,
            profile_count: 0,
        })?;
        self.store
            .put_action_factors(genesis, self.config.genesis_action_factors)?;
        self.store
            .put_reputation_factors(genesis, self.config.genesis_reputation_factors)?;
        for (kind, address) in &self.config.genesis_whitelist {
            self.store.set_whitelisted(*kind, *address, true)?;
        }
        info!(
            governance = %self.config.governance,
            state = %self.config.initial_state,
            whitelisted = self.config.genesis_whitelist.len(),
            "Ledger genesis written"
        );
        Ok(())
    }

    /// Service configuration.
    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Underlying event sink.
    #[must_use]
    pub fn event_sink(&self) -> &E {
        &self.events
    }

    /// Underlying clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get current service statistics.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    // =========================================================================
    // ATOMIC OPERATION WRAPPER
    // =========================================================================

    /// Runs `op` inside a store transaction.
    ///
    /// On success the transaction commits and buffered events are delivered
    /// in order. On failure the transaction rolls back and no event is
    /// delivered. A panic inside `op` also rolls back before it propagates.
    pub(crate) fn atomically<T>(
        &self,
        operation: &'static str,
        op: impl FnOnce(&mut OpContext) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        self.store.begin()?;
        let mut ctx = OpContext::new(self.clock.now());

        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| op(&mut ctx))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                if let Err(rollback_err) = self.store.rollback() {
                    error!(operation, error = %rollback_err, "Rollback after panic failed");
                }
                self.stats.write().operations_rejected += 1;
                metrics::record_rejected(operation);
                error!(operation, "Operation panicked; rolled back");
                panic::resume_unwind(payload);
            }
        };

        match outcome {
            Ok(value) => {
                self.store.commit()?;
                let delivered = self.deliver(ctx);
                {
                    let mut stats = self.stats.write();
                    stats.operations_committed += 1;
                    stats.events_emitted += delivered;
                }
                metrics::record_operation(operation);
                debug!(operation, events = delivered, "Operation committed");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.store.rollback() {
                    error!(operation, error = %rollback_err, "Rollback failed");
                    return Err(rollback_err.into());
                }
                self.stats.write().operations_rejected += 1;
                metrics::record_rejected(operation);
                warn!(operation, error = %err, "Operation rejected");
                Err(err)
            }
        }
    }

    fn deliver(&self, ctx: OpContext) -> u64 {
        let count = ctx.events.len() as u64;
        for event in ctx.events {
            let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);
            self.events.emit(EventRecord {
                sequence,
                timestamp: ctx.now,
                event,
            });
        }
        metrics::record_events_emitted(count);
        count
    }

    pub(crate) fn bump_stats(&self, update: impl FnOnce(&mut ServiceStats)) {
        update(&mut self.stats.write());
    }

    // =========================================================================
    // SHARED LOOKUPS
    // =========================================================================

    pub(crate) fn settings(&self) -> LedgerResult<ProtocolSettings> {
        self.store
            .settings()?
            .ok_or_else(|| StoreError::Corrupted("protocol settings missing".into()).into())
    }

    pub(crate) fn state(&self) -> LedgerResult<ProtocolState> {
        Ok(self.settings()?.state)
    }

    /// Live (not burned) profile.
    pub(crate) fn live_profile(&self, profile_id: ProfileId) -> LedgerResult<Profile> {
        match self.store.profile(profile_id)? {
            Some(profile) if !profile.is_burned() => Ok(profile),
            _ => Err(LedgerError::ProfileDoesNotExist(profile_id)),
        }
    }

    /// Owner record of a publication, burned or not.
    pub(crate) fn content_owner(&self, profile_id: ProfileId) -> LedgerResult<Profile> {
        self.store
            .profile(profile_id)?
            .ok_or(LedgerError::ProfileDoesNotExist(profile_id))
    }

    /// Handle index still maps the profile's handle back to it.
    pub(crate) fn handle_bijection_holds(&self, profile: &Profile) -> LedgerResult<bool> {
        let key = handle_hash(&profile.handle);
        let indexed = self.store.handle_owner(&key)?;
        Ok(check_handle_bijection(profile, |k| if *k == key { indexed } else { None }))
    }

    pub(crate) fn existing_publication(&self, key: PublicationRef) -> LedgerResult<Publication> {
        self.store
            .publication(key)?
            .ok_or(LedgerError::PublicationDoesNotExist(key))
    }

    /// Follows mirror pointers until a publication with a collect module.
    ///
    /// Pointers always target publications that existed when the mirror was
    /// created, so the walk ends after at most one step per stored mirror.
    pub(crate) fn resolve_root(&self, key: PublicationRef) -> LedgerResult<Publication> {
        let mut current = self.existing_publication(key)?;
        let mut visited = HashSet::new();
        while current.is_mirror() {
            if !visited.insert(current.reference()) {
                return Err(StoreError::Corrupted(format!("mirror cycle at {}", current.reference())).into());
            }
            let pointer = current
                .pointer
                .ok_or_else(|| StoreError::Corrupted(format!("mirror {} without pointer", current.reference())))?;
            current = self.existing_publication(pointer)?;
        }
        Ok(current)
    }

    pub(crate) fn require_whitelisted(
        &self,
        kind: WhitelistKind,
        address: Address,
    ) -> LedgerResult<()> {
        if self.store.is_whitelisted(kind, address)? {
            return Ok(());
        }
        Err(match kind {
            WhitelistKind::ProfileCreator => LedgerError::ProfileCreatorNotWhitelisted(address),
            WhitelistKind::FollowModule => LedgerError::FollowModuleNotWhitelisted(address),
            WhitelistKind::CollectModule => LedgerError::CollectModuleNotWhitelisted(address),
            WhitelistKind::ReferenceModule => LedgerError::ReferenceModuleNotWhitelisted(address),
            WhitelistKind::Currency => LedgerError::CurrencyNotWhitelisted(address),
        })
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Profile by id; burned profiles are reported as absent.
    pub fn get_profile(&self, profile_id: ProfileId) -> LedgerResult<Option<Profile>> {
        Ok(self.store.profile(profile_id)?.filter(|p| !p.is_burned()))
    }

    /// Publication by key.
    pub fn get_publication(&self, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<Option<Publication>> {
        Ok(self.store.publication(PublicationRef::new(profile_id, pub_id))?)
    }

    /// Root of a publication: itself unless it is a mirror.
    pub fn get_pointed_if_mirror(&self, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<PublicationRef> {
        Ok(self.resolve_root(PublicationRef::new(profile_id, pub_id))?.reference())
    }

    /// Default profile of a wallet.
    pub fn get_default_profile(&self, wallet: Address) -> LedgerResult<Option<ProfileId>> {
        Ok(self.store.default_profile(wallet)?)
    }

    /// Protocol settings.
    pub fn protocol_settings(&self) -> LedgerResult<ProtocolSettings> {
        self.settings()
    }
}

impl<S: LedgerStore, E: EventSink, C: Clock> FollowGraph for SocialLedgerService<S, E, C> {
    fn is_following(&self, profile_id: ProfileId, follower: Address) -> Result<bool, StoreError> {
        let Some(profile) = self.store.profile(profile_id)?.filter(|p| !p.is_burned()) else {
            return Ok(false);
        };
        let holds_unit = match profile.follow_record {
            Some(record) => self.store.unit_balance(record, follower)? > 0,
            None => false,
        };
        Ok(match profile.follow_module {
            Some(address) => self
                .modules
                .follow_module(address)
                .map_err(|_| {
                    StoreError::Corrupted(format!("follow module {address} of {profile_id} is not registered"))
                })?
                .is_following(profile_id, follower, holds_unit),
            None => holds_unit,
        })
    }

    fn profile_owner(&self, profile_id: ProfileId) -> Result<Option<Address>, StoreError> {
        Ok(self.store.profile(profile_id)?.and_then(|p| p.owner))
    }
}

// =============================================================================
// API IMPLEMENTATION
// =============================================================================

impl<S: LedgerStore, E: EventSink, C: Clock> SocialGraphApi for SocialLedgerService<S, E, C> {
    fn create_profile(&self, caller: Address, params: CreateProfileParams) -> LedgerResult<ProfileId> {
        Self::create_profile(self, caller, params)
    }

    fn set_default_profile(&self, caller: Address, profile_id: Option<ProfileId>) -> LedgerResult<()> {
        Self::set_default_profile(self, caller, profile_id)
    }

    fn set_dispatcher(&self, caller: Address, profile_id: ProfileId, dispatcher: Option<Address>) -> LedgerResult<()> {
        Self::set_dispatcher(self, caller, profile_id, dispatcher)
    }

    fn set_follow_module(
        &self,
        caller: Address,
        profile_id: ProfileId,
        follow_module: Option<Address>,
        init_data: &[u8],
    ) -> LedgerResult<()> {
        Self::set_follow_module(self, caller, profile_id, follow_module, init_data)
    }

    fn transfer_profile(&self, caller: Address, profile_id: ProfileId, to: Address) -> LedgerResult<()> {
        Self::transfer_profile(self, caller, profile_id, to)
    }

    fn burn_profile(&self, caller: Address, profile_id: ProfileId) -> LedgerResult<()> {
        Self::burn_profile(self, caller, profile_id)
    }

    fn post(&self, caller: Address, params: PostParams) -> LedgerResult<PubId> {
        Self::post(self, caller, params)
    }

    fn comment(&self, caller: Address, params: CommentParams) -> LedgerResult<PubId> {
        Self::comment(self, caller, params)
    }

    fn mirror(&self, caller: Address, params: MirrorParams) -> LedgerResult<PubId> {
        Self::mirror(self, caller, params)
    }

    fn follow(&self, caller: Address, profile_ids: &[ProfileId], data: &[Vec<u8>]) -> LedgerResult<Vec<UnitId>> {
        Self::follow(self, caller, profile_ids, data)
    }

    fn collect(&self, caller: Address, profile_id: ProfileId, pub_id: PubId, data: &[u8]) -> LedgerResult<UnitId> {
        Self::collect(self, caller, profile_id, pub_id, data)
    }

    fn vote(&self, caller: Address, profile_id: ProfileId, pub_id: PubId, amount: i8) -> LedgerResult<()> {
        Self::vote(self, caller, profile_id, pub_id, amount)
    }

    fn like(&self, caller: Address, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<()> {
        Self::like(self, caller, profile_id, pub_id)
    }

    fn report(&self, caller: Address, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<()> {
        Self::report(self, caller, profile_id, pub_id)
    }

    fn stake(&self, caller: Address, params: StakeParams) -> LedgerResult<()> {
        Self::stake(self, caller, params)
    }

    fn resolve_bet(&self, caller: Address, profile_id: ProfileId, pub_id: PubId, correct_option: u8) -> LedgerResult<()> {
        Self::resolve_bet(self, caller, profile_id, pub_id, correct_option)
    }

    fn record_recommendation_outcome(&self, caller: Address, profile_id: ProfileId, successful: bool) -> LedgerResult<()> {
        Self::record_recommendation_outcome(self, caller, profile_id, successful)
    }

    fn set_state(&self, caller: Address, state: ProtocolState) -> LedgerResult<()> {
        Self::set_state(self, caller, state)
    }

    fn set_governance(&self, caller: Address, governance: Address) -> LedgerResult<()> {
        Self::set_governance(self, caller, governance)
    }

    fn set_emergency_admin(&self, caller: Address, admin: Option<Address>) -> LedgerResult<()> {
        Self::set_emergency_admin(self, caller, admin)
    }

    fn set_whitelisted(&self, caller: Address, kind: WhitelistKind, address: Address, whitelisted: bool) -> LedgerResult<()> {
        Self::set_whitelisted(self, caller, kind, address, whitelisted)
    }

    fn set_action_factors(&self, caller: Address, revision: Revision, factors: ActionFactors) -> LedgerResult<()> {
        Self::set_action_factors(self, caller, revision, factors)
    }

    fn set_reputation_factors(&self, caller: Address, revision: Revision, factors: ReputationFactors) -> LedgerResult<()> {
        Self::set_reputation_factors(self, caller, revision, factors)
    }

    fn set_current_revision(&self, caller: Address, revision: Revision) -> LedgerResult<()> {
        Self::set_current_revision(self, caller, revision)
    }

    fn get_profile(&self, profile_id: ProfileId) -> LedgerResult<Option<Profile>> {
        Self::get_profile(self, profile_id)
    }

    fn get_profile_id_by_handle(&self, handle: &str) -> LedgerResult<Option<ProfileId>> {
        Self::get_profile_id_by_handle(self, handle)
    }

    fn get_publication(&self, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<Option<Publication>> {
        Self::get_publication(self, profile_id, pub_id)
    }

    fn get_pointed_if_mirror(&self, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<PublicationRef> {
        Self::get_pointed_if_mirror(self, profile_id, pub_id)
    }

    fn get_default_profile(&self, wallet: Address) -> LedgerResult<Option<ProfileId>> {
        Self::get_default_profile(self, wallet)
    }

    fn is_following(&self, profile_id: ProfileId, follower: Address) -> LedgerResult<bool> {
        Self::is_following(self, profile_id, follower)
    }

    fn has_acted(&self, publication: PublicationRef, actor: Address, kind: ActionKind) -> LedgerResult<bool> {
        Self::has_acted(self, publication, actor, kind)
    }

    fn reputation(&self, profile_id: ProfileId) -> LedgerResult<i64> {
        Self::reputation(self, profile_id)
    }

    fn level(&self, profile_id: ProfileId) -> LedgerResult<u32> {
        Self::level(self, profile_id)
    }

    fn get_ownership_record(&self, record: Address) -> LedgerResult<Option<OwnershipRecord>> {
        Self::get_ownership_record(self, record)
    }

    fn unit_owner(&self, record: Address, unit: UnitId) -> LedgerResult<Option<Address>> {
        Self::unit_owner(self, record, unit)
    }

    fn protocol_settings(&self) -> LedgerResult<ProtocolSettings> {
        Self::protocol_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryLedgerStore, InMemoryTokenCustody, ManualClock, RecordingEventSink};
    use crate::config::ConfigError;
    use crate::errors::ModuleError;
    use crate::ports::outbound::FollowModule;

    struct PanickingFollowModule;

    impl FollowModule for PanickingFollowModule {
        fn initialize_follow_module(&self, _profile_id: ProfileId, _data: &[u8]) -> Result<(), ModuleError> {
            Ok(())
        }

        fn process_follow(&self, _follower: Address, _profile_id: ProfileId, _data: &[u8]) -> Result<(), ModuleError> {
            panic!("follow module failure");
        }
    }

    #[test]
    fn test_genesis_writes_settings_and_factors() {
        let t = create_test_service().unwrap();
        let settings = t.service.protocol_settings().unwrap();
        assert_eq!(settings.state, ProtocolState::Unpaused);
        assert_eq!(settings.current_revision, Revision(1));
        assert_eq!(settings.governance, fixtures::GOVERNANCE);
        assert!(t.service.store().action_factors(Revision(1)).unwrap().is_some());
        assert!(t
            .service
            .store()
            .is_whitelisted(WhitelistKind::CollectModule, fixtures::FREE_COLLECT)
            .unwrap());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = LedgerConfig {
            governance: Address::ZERO,
            ..LedgerConfig::default()
        };
        let result = SocialLedgerService::new(
            config,
            InMemoryLedgerStore::new(),
            RecordingEventSink::new(),
            ManualClock::new(0),
            Arc::new(InMemoryTokenCustody::new()),
            ModuleRegistry::new(),
        );
        assert!(matches!(
            result.err(),
            Some(LedgerError::InvalidConfig(ConfigError::ZeroAddress { field: "governance" }))
        ));
    }

    #[test]
    fn test_rejected_operation_leaves_no_trace() {
        let t = create_test_service().unwrap();
        let before = t.service.store().snapshot();
        let err = t
            .service
            .set_state(fixtures::ALICE, ProtocolState::Paused)
            .unwrap_err();
        assert_eq!(err, LedgerError::NotGovernanceOrEmergencyAdmin);
        assert_eq!(t.service.store().snapshot(), before);
        assert!(t.service.event_sink().is_empty());
        assert_eq!(t.service.stats().operations_rejected, 1);
    }

    #[test]
    fn test_panicking_module_rolls_back() {
        let modules = ModuleRegistry::new()
            .with_follow_module(fixtures::APPROVAL_FOLLOW, Arc::new(PanickingFollowModule));
        let service = SocialLedgerService::new(
            test_config(),
            InMemoryLedgerStore::new(),
            RecordingEventSink::new(),
            ManualClock::new(fixtures::GENESIS_TIME),
            Arc::new(InMemoryTokenCustody::new()),
            modules,
        )
        .unwrap();
        let alice = service
            .create_profile(
                fixtures::ALICE,
                CreateProfileParams {
                    to: fixtures::ALICE,
                    handle: "alice".into(),
                    follow_module: Some(fixtures::APPROVAL_FOLLOW),
                    ..CreateProfileParams::default()
                },
            )
            .unwrap();
        let before = service.store().snapshot();
        let events = service.event_sink().len();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            service.follow(fixtures::BOB, &[alice], &[Vec::new()])
        }));
        assert!(result.is_err());
        assert!(!service.store().in_transaction());
        assert_eq!(service.store().snapshot(), before);
        assert_eq!(service.event_sink().len(), events);
        assert_eq!(service.stats().operations_rejected, 1);

        // The ledger stays usable after the unwind.
        let bob = service
            .create_profile(
                fixtures::BOB,
                CreateProfileParams {
                    to: fixtures::BOB,
                    handle: "bob".into(),
                    ..CreateProfileParams::default()
                },
            )
            .unwrap();
        assert_eq!(service.get_profile(bob).unwrap().unwrap().handle, "bob");
    }

    #[test]
    fn test_event_sequence_is_gap_free_across_rejections() {
        let t = create_test_service().unwrap();
        t.create_profile(fixtures::ALICE, "alice").unwrap();
        let _ = t.service.set_state(fixtures::BOB, ProtocolState::Paused);
        t.service
            .set_state(fixtures::GOVERNANCE, ProtocolState::PublishingPaused)
            .unwrap();

        let sequences: Vec<u64> = t.service.event_sink().records().iter().map(|r| r.sequence).collect();
        let expected: Vec<u64> = (1..=sequences.len() as u64).collect();
        assert_eq!(sequences, expected);
        assert!(t
            .service
            .event_sink()
            .records()
            .iter()
            .all(|r| r.timestamp == fixtures::GENESIS_TIME));
    }

    #[test]
    fn test_resolve_root_of_post_is_itself() {
        let t = create_test_service().unwrap();
        let alice = t.create_profile(fixtures::ALICE, "alice").unwrap();
        let pub_id = t.post(fixtures::ALICE, alice).unwrap();
        assert_eq!(
            t.service.get_pointed_if_mirror(alice, pub_id).unwrap(),
            PublicationRef::new(alice, pub_id)
        );
        assert_eq!(
            t.service.get_pointed_if_mirror(alice, PubId(9)),
            Err(LedgerError::PublicationDoesNotExist(PublicationRef::new(alice, PubId(9))))
        );
    }
}
