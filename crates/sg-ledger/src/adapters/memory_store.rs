//! # In-Memory Ledger Store
//!
//! `HashMap`-backed [`LedgerStore`] with an undo journal. While a transaction
//! is open every write records the value it replaced; rollback replays those
//! records in reverse.

use crate::domain::entities::{
    ActionKey, OwnershipRecord, Profile, ProtocolSettings, Publication, StakeKey,
};
use crate::domain::scoring::{ActionFactors, ReputationFactors};
use crate::domain::value_objects::{
    Address, Hash, ProfileId, PublicationRef, Revision, UnitId, WhitelistKind,
};
use crate::errors::StoreError;
use crate::ports::outbound::LedgerStore;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash as StdHash;
use tracing::trace;

/// Full contents of the store, comparable for equality.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    /// Protocol settings row.
    pub settings: Option<ProtocolSettings>,
    /// Profiles by id.
    pub profiles: HashMap<ProfileId, Profile>,
    /// Handle index.
    pub handles: HashMap<Hash, ProfileId>,
    /// Default profile per wallet.
    pub default_profiles: HashMap<Address, ProfileId>,
    /// Publications by key.
    pub publications: HashMap<PublicationRef, Publication>,
    /// Set action flags.
    pub actions: HashSet<ActionKey>,
    /// Set stake flags.
    pub stakes: HashSet<StakeKey>,
    /// Ownership records by address.
    pub records: HashMap<Address, OwnershipRecord>,
    /// Unit holders.
    pub unit_owners: HashMap<(Address, UnitId), Address>,
    /// Unit balances.
    pub unit_balances: HashMap<(Address, Address), u64>,
    /// Whitelist entries.
    pub whitelists: HashSet<(WhitelistKind, Address)>,
    /// Action weights by revision.
    pub action_factors: BTreeMap<Revision, ActionFactors>,
    /// Reputation weights by revision.
    pub reputation_factors: BTreeMap<Revision, ReputationFactors>,
}

/// Prior value of one written key.
#[derive(Debug)]
enum UndoEntry {
    Settings(Option<ProtocolSettings>),
    Profile(ProfileId, Option<Profile>),
    Handle(Hash, Option<ProfileId>),
    DefaultProfile(Address, Option<ProfileId>),
    Publication(PublicationRef, Option<Publication>),
    ActionFlag(ActionKey, bool),
    StakeFlag(StakeKey, bool),
    Record(Address, Option<OwnershipRecord>),
    UnitOwner((Address, UnitId), Option<Address>),
    UnitBalance((Address, Address), Option<u64>),
    Whitelist((WhitelistKind, Address), bool),
    ActionFactors(Revision, Option<ActionFactors>),
    ReputationFactors(Revision, Option<ReputationFactors>),
}

#[derive(Debug, Default)]
struct Inner {
    data: LedgerSnapshot,
    journal: Option<Vec<UndoEntry>>,
}

/// In-memory ledger store.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    inner: RwLock<Inner>,
}

fn put_map<K: Eq + StdHash, V>(map: &mut HashMap<K, V>, key: K, value: Option<V>) -> Option<V> {
    match value {
        Some(value) => map.insert(key, value),
        None => map.remove(&key),
    }
}

fn put_btree<K: Ord, V>(map: &mut BTreeMap<K, V>, key: K, value: Option<V>) -> Option<V> {
    match value {
        Some(value) => map.insert(key, value),
        None => map.remove(&key),
    }
}

fn put_flag<K: Eq + StdHash>(set: &mut HashSet<K>, key: K, value: bool) -> bool {
    if value {
        !set.insert(key)
    } else {
        set.remove(&key)
    }
}

impl LedgerSnapshot {
    fn undo(&mut self, entry: UndoEntry) {
        match entry {
            UndoEntry::Settings(prior) => self.settings = prior,
            UndoEntry::Profile(key, prior) => {
                put_map(&mut self.profiles, key, prior);
            }
            UndoEntry::Handle(key, prior) => {
                put_map(&mut self.handles, key, prior);
            }
            UndoEntry::DefaultProfile(key, prior) => {
                put_map(&mut self.default_profiles, key, prior);
            }
            UndoEntry::Publication(key, prior) => {
                put_map(&mut self.publications, key, prior);
            }
            UndoEntry::ActionFlag(key, prior) => {
                put_flag(&mut self.actions, key, prior);
            }
            UndoEntry::StakeFlag(key, prior) => {
                put_flag(&mut self.stakes, key, prior);
            }
            UndoEntry::Record(key, prior) => {
                put_map(&mut self.records, key, prior);
            }
            UndoEntry::UnitOwner(key, prior) => {
                put_map(&mut self.unit_owners, key, prior);
            }
            UndoEntry::UnitBalance(key, prior) => {
                put_map(&mut self.unit_balances, key, prior);
            }
            UndoEntry::Whitelist(key, prior) => {
                put_flag(&mut self.whitelists, key, prior);
            }
            UndoEntry::ActionFactors(key, prior) => {
                put_btree(&mut self.action_factors, key, prior);
            }
            UndoEntry::ReputationFactors(key, prior) => {
                put_btree(&mut self.reputation_factors, key, prior);
            }
        }
    }
}

impl InMemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the full store contents.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.inner.read().data.clone()
    }

    /// Returns true while a transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.inner.read().journal.is_some()
    }

    /// Number of profiles stored, burned ones included.
    #[must_use]
    pub fn profile_count(&self) -> usize {
        self.inner.read().data.profiles.len()
    }

    fn write(&self, apply: impl FnOnce(&mut LedgerSnapshot) -> UndoEntry) {
        let mut inner = self.inner.write();
        let undo = apply(&mut inner.data);
        if let Some(journal) = inner.journal.as_mut() {
            journal.push(undo);
        }
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn begin(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if inner.journal.is_some() {
            return Err(StoreError::TransactionInProgress);
        }
        inner.journal = Some(Vec::new());
        Ok(())
    }

    fn commit(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let journal = inner.journal.take().ok_or(StoreError::NoTransaction)?;
        trace!(writes = journal.len(), "transaction committed");
        Ok(())
    }

    fn rollback(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let journal = inner.journal.take().ok_or(StoreError::NoTransaction)?;
        trace!(writes = journal.len(), "transaction rolled back");
        for entry in journal.into_iter().rev() {
            inner.data.undo(entry);
        }
        Ok(())
    }

    fn settings(&self) -> Result<Option<ProtocolSettings>, StoreError> {
        Ok(self.inner.read().data.settings.clone())
    }

    fn put_settings(&self, settings: ProtocolSettings) -> Result<(), StoreError> {
        self.write(|data| UndoEntry::Settings(data.settings.replace(settings)));
        Ok(())
    }

    fn is_whitelisted(&self, kind: WhitelistKind, address: Address) -> Result<bool, StoreError> {
        Ok(self.inner.read().data.whitelists.contains(&(kind, address)))
    }

    fn set_whitelisted(
        &self,
        kind: WhitelistKind,
        address: Address,
        whitelisted: bool,
    ) -> Result<(), StoreError> {
        let key = (kind, address);
        self.write(|data| UndoEntry::Whitelist(key, put_flag(&mut data.whitelists, key, whitelisted)));
        Ok(())
    }

    fn action_factors(&self, revision: Revision) -> Result<Option<ActionFactors>, StoreError> {
        Ok(self.inner.read().data.action_factors.get(&revision).copied())
    }

    fn put_action_factors(&self, revision: Revision, factors: ActionFactors) -> Result<(), StoreError> {
        self.write(|data| {
            UndoEntry::ActionFactors(revision, data.action_factors.insert(revision, factors))
        });
        Ok(())
    }

    fn reputation_factors(&self, revision: Revision) -> Result<Option<ReputationFactors>, StoreError> {
        Ok(self.inner.read().data.reputation_factors.get(&revision).copied())
    }

    fn put_reputation_factors(
        &self,
        revision: Revision,
        factors: ReputationFactors,
    ) -> Result<(), StoreError> {
        self.write(|data| {
            UndoEntry::ReputationFactors(revision, data.reputation_factors.insert(revision, factors))
        });
        Ok(())
    }

    fn profile(&self, id: ProfileId) -> Result<Option<Profile>, StoreError> {
        Ok(self.inner.read().data.profiles.get(&id).cloned())
    }

    fn put_profile(&self, profile: Profile) -> Result<(), StoreError> {
        let id = profile.id;
        self.write(|data| UndoEntry::Profile(id, data.profiles.insert(id, profile)));
        Ok(())
    }

    fn handle_owner(&self, key: &Hash) -> Result<Option<ProfileId>, StoreError> {
        Ok(self.inner.read().data.handles.get(key).copied())
    }

    fn set_handle_owner(&self, key: Hash, id: Option<ProfileId>) -> Result<(), StoreError> {
        self.write(|data| UndoEntry::Handle(key, put_map(&mut data.handles, key, id)));
        Ok(())
    }

    fn default_profile(&self, wallet: Address) -> Result<Option<ProfileId>, StoreError> {
        Ok(self.inner.read().data.default_profiles.get(&wallet).copied())
    }

    fn set_default_profile(&self, wallet: Address, id: Option<ProfileId>) -> Result<(), StoreError> {
        self.write(|data| {
            UndoEntry::DefaultProfile(wallet, put_map(&mut data.default_profiles, wallet, id))
        });
        Ok(())
    }

    fn publication(&self, key: PublicationRef) -> Result<Option<Publication>, StoreError> {
        Ok(self.inner.read().data.publications.get(&key).cloned())
    }

    fn put_publication(&self, publication: Publication) -> Result<(), StoreError> {
        let key = publication.reference();
        self.write(|data| UndoEntry::Publication(key, data.publications.insert(key, publication)));
        Ok(())
    }

    fn has_acted(&self, key: &ActionKey) -> Result<bool, StoreError> {
        Ok(self.inner.read().data.actions.contains(key))
    }

    fn set_acted(&self, key: ActionKey) -> Result<(), StoreError> {
        self.write(|data| UndoEntry::ActionFlag(key, put_flag(&mut data.actions, key, true)));
        Ok(())
    }

    fn has_staked(&self, key: &StakeKey) -> Result<bool, StoreError> {
        Ok(self.inner.read().data.stakes.contains(key))
    }

    fn set_staked(&self, key: StakeKey) -> Result<(), StoreError> {
        self.write(|data| UndoEntry::StakeFlag(key, put_flag(&mut data.stakes, key, true)));
        Ok(())
    }

    fn ownership_record(&self, address: Address) -> Result<Option<OwnershipRecord>, StoreError> {
        Ok(self.inner.read().data.records.get(&address).cloned())
    }

    fn put_ownership_record(&self, record: OwnershipRecord) -> Result<(), StoreError> {
        let key = record.address;
        self.write(|data| UndoEntry::Record(key, data.records.insert(key, record)));
        Ok(())
    }

    fn unit_owner(&self, record: Address, unit: UnitId) -> Result<Option<Address>, StoreError> {
        Ok(self.inner.read().data.unit_owners.get(&(record, unit)).copied())
    }

    fn set_unit_owner(&self, record: Address, unit: UnitId, owner: Address) -> Result<(), StoreError> {
        let key = (record, unit);
        self.write(|data| UndoEntry::UnitOwner(key, data.unit_owners.insert(key, owner)));
        Ok(())
    }

    fn unit_balance(&self, record: Address, holder: Address) -> Result<u64, StoreError> {
        Ok(self
            .inner
            .read()
            .data
            .unit_balances
            .get(&(record, holder))
            .copied()
            .unwrap_or(0))
    }

    fn set_unit_balance(&self, record: Address, holder: Address, balance: u64) -> Result<(), StoreError> {
        let key = (record, holder);
        let value = (balance != 0).then_some(balance);
        self.write(|data| UndoEntry::UnitBalance(key, put_map(&mut data.unit_balances, key, value)));
        Ok(())
    }
}
