//! Lazy follow / collect ownership records.
//!
//! A record is created the first time a profile is followed or a root
//! publication is collected, and reused from then on. The provisioning event
//! fires exactly once per record.

use super::{OpContext, SocialLedgerService};
use crate::domain::entities::{OwnershipRecord, OwnershipScope, Publication};
use crate::domain::invariants::check_follow_record_stable;
use crate::domain::services::{
    collect_record_address, collect_record_metadata, follow_record_address, follow_record_metadata,
};
use crate::domain::value_objects::{Address, ProfileId, UnitId};
use crate::errors::{LedgerError, LedgerResult, StoreError};
use crate::events::LedgerEvent;
use crate::ports::outbound::{Clock, EventSink, LedgerStore};
use tracing::debug;

impl<S: LedgerStore, E: EventSink, C: Clock> SocialLedgerService<S, E, C> {
    /// Follow record of a live profile, created on first use.
    pub(crate) fn ensure_follow_ownership(
        &self,
        ctx: &mut OpContext,
        profile_id: ProfileId,
    ) -> LedgerResult<Address> {
        let mut profile = self.live_profile(profile_id)?;
        if let Some(record) = profile.follow_record {
            return Ok(record);
        }

        let address = follow_record_address(self.config.hub, profile_id);
        let (name, symbol) = follow_record_metadata(&profile.handle);
        self.store.put_ownership_record(OwnershipRecord {
            address,
            scope: OwnershipScope::Follow { profile_id },
            name,
            symbol,
            hub: self.config.hub,
            minted: 0,
            created_at: ctx.now,
        })?;

        let before = profile.clone();
        profile.follow_record = Some(address);
        if !check_follow_record_stable(&before, &profile) {
            return Err(StoreError::Corrupted(format!("follow record of {profile_id} replaced")).into());
        }
        self.store.put_profile(profile)?;

        ctx.emit(LedgerEvent::FollowOwnershipProvisioned {
            profile_id,
            record: address,
        });
        debug!(profile_id = %profile_id, record = %address, "Follow ownership provisioned");
        Ok(address)
    }

    /// Collect record of a root publication, created on first use.
    ///
    /// Sets `root.collect_record`; the caller persists `root`.
    pub(crate) fn ensure_collect_ownership(
        &self,
        ctx: &mut OpContext,
        root: &mut Publication,
        handle: &str,
    ) -> LedgerResult<Address> {
        if let Some(record) = root.collect_record {
            return Ok(record);
        }

        let publication = root.reference();
        let address = collect_record_address(self.config.hub, publication);
        let (name, symbol) = collect_record_metadata(handle, root.pub_id);
        self.store.put_ownership_record(OwnershipRecord {
            address,
            scope: OwnershipScope::Collect { publication },
            name,
            symbol,
            hub: self.config.hub,
            minted: 0,
            created_at: ctx.now,
        })?;
        root.collect_record = Some(address);

        ctx.emit(LedgerEvent::CollectOwnershipProvisioned {
            publication,
            record: address,
        });
        debug!(publication = %publication, record = %address, "Collect ownership provisioned");
        Ok(address)
    }

    /// Mints the next unit of `record` to `to`.
    pub(crate) fn mint(&self, record: Address, to: Address) -> LedgerResult<UnitId> {
        let mut ownership = self
            .store
            .ownership_record(record)?
            .ok_or_else(|| StoreError::Corrupted(format!("ownership record {record} missing")))?;
        let minted = ownership
            .minted
            .checked_add(1)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let unit_id = ownership.next_unit_id();
        ownership.minted = minted;
        self.store.put_ownership_record(ownership)?;

        let balance = self
            .store
            .unit_balance(record, to)?
            .checked_add(1)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.store.set_unit_owner(record, unit_id, to)?;
        self.store.set_unit_balance(record, to, balance)?;
        Ok(unit_id)
    }

    /// Ownership record by address.
    pub fn get_ownership_record(&self, record: Address) -> LedgerResult<Option<OwnershipRecord>> {
        Ok(self.store.ownership_record(record)?)
    }

    /// Holder of a minted unit.
    pub fn unit_owner(&self, record: Address, unit: UnitId) -> LedgerResult<Option<Address>> {
        Ok(self.store.unit_owner(record, unit)?)
    }
}
